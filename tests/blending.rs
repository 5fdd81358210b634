use vecraster::{Rasterizer,PixelBuffer,PaintMaterial,Paint,Argb,GammaLut,OpacityMask};
use vecraster::{FillingRule,LinearGradient,RadialGradient,ColorRamp,Transform};

const TRIANGLE : [f64; 6] = [1.3,0.7, 14.6,5.2, 4.1,13.9];

fn draw(setup: &dyn Fn(&mut Rasterizer), paint: PaintMaterial) -> PixelBuffer {
    let mut ras = Rasterizer::new();
    let mut buf = PixelBuffer::new(16, 16);
    buf.clear(0xFF204060);
    ras.attach(buf);
    ras.set_paint(paint);
    setup(&mut ras);
    ras.fill_polygon(&TRIANGLE, 3, 0).unwrap();
    ras.detach().unwrap()
}

fn solid(c: u32) -> PaintMaterial {
    PaintMaterial::new(Paint::solid(Argb::from_u32(c)))
}

#[test]
fn gamma_identity_matches_plain() {
    for &c in [0xFFFF8000, 0x80FF8000, 0x20102030].iter() {
        let plain = draw(&|_| {}, solid(c));
        let gamma = draw(&|r| r.set_gamma(Some(GammaLut::identity())), solid(c));
        assert_eq!(plain.data(), gamma.data());
    }
}

#[test]
fn gamma_changes_edges_only() {
    let plain = draw(&|_| {}, solid(0xFFFFFFFF));
    let gamma = draw(&|r| r.set_gamma(Some(GammaLut::new(2.2))), solid(0xFFFFFFFF));
    assert_ne!(plain.data(), gamma.data());
    // Fully covered pixels copy the source
    assert_eq!(plain.get(5, 5), 0xFFFFFFFF);
    assert_eq!(gamma.get(5, 5), 0xFFFFFFFF);
    // Untouched pixels stay
    assert_eq!(gamma.get(15, 15), 0xFF204060);
}

#[test_log::test]
fn uniform_mask_equals_opacity() {
    let masked = draw(&|r| r.set_mask(Some(OpacityMask::uniform(16, 16, 127))), solid(0xFFFF8000));
    let faded = draw(&|_| {}, solid(0xFFFF8000).with_opacity(0.5));
    assert_eq!(masked.data(), faded.data());
    assert_ne!(masked.get(5, 5), 0xFFFF8000);
}

#[test]
fn mask_bounds() {
    let mask = OpacityMask::uniform(8, 16, 255);
    let masked = draw(&|r| r.set_mask(Some(mask.clone())), solid(0xFF0000FF));
    let full = draw(&|_| {}, solid(0xFF0000FF));
    for y in 0 .. 16 {
        for x in 0 .. 16 {
            if x < 8 {
                assert_eq!(masked.get(x, y), full.get(x, y));
            } else {
                // Outside of the mask nothing is drawn
                assert_eq!(masked.get(x, y), 0xFF204060);
            }
        }
    }
}

#[test]
fn zero_opacity_draws_nothing() {
    let buf = draw(&|_| {}, solid(0xFFFFFFFF).with_opacity(0.0));
    assert!(buf.data().iter().all(|&p| p == 0xFF204060));
    let buf = draw(&|_| {}, solid(0x00FFFFFF));
    assert!(buf.data().iter().all(|&p| p == 0xFF204060));
}

#[test]
fn mask_from_polygon() {
    let mut ras = Rasterizer::new();
    ras.attach(PixelBuffer::new(16, 16));
    let mut mask = OpacityMask::new(0, 0, 16, 16);
    ras.begin().unwrap();
    ras.add_polygon(&[0.,0., 8.,0., 8.,16., 0.,16.], 4, 0).unwrap();
    ras.finish_to_mask(&mut mask).unwrap();
    assert_eq!(mask.value(3, 3), Some(255));
    assert_eq!(mask.value(12, 3), Some(0));

    // Gamma is not supported when building masks
    ras.set_gamma(Some(GammaLut::new(1.8)));
    ras.begin().unwrap();
    ras.add_polygon(&[0.,0., 8.,0., 8.,16.], 3, 0).unwrap();
    assert!(ras.finish_to_mask(&mut mask).is_err());
    ras.set_gamma(None);

    // Draw through it
    ras.set_mask(Some(mask));
    ras.set_paint(PaintMaterial::new(Paint::solid(Argb::white())));
    ras.fill_polygon(&[0.,0., 16.,0., 16.,16., 0.,16.], 4, 0).unwrap();
    let buf = ras.buffer().unwrap();
    assert_eq!(buf.get(3, 3), 0xFFFFFFFF);
    assert_eq!(buf.get(12, 3), 0);
}

/// Five pointed star, its center is covered twice
fn star() -> Vec<f64> {
    (0 .. 5).flat_map(|i| {
        let a = std::f64::consts::PI * (-0.5 + 0.8 * f64::from(i));
        vec![8.0 + 7.0 * a.cos(), 8.0 + 7.0 * a.sin()]
    }).collect()
}

fn paints() -> Vec<Paint> {
    let ramp = || ColorRamp::two(Argb::new(255, 200, 30, 0), Argb::new(160, 10, 90, 250));
    vec![Paint::solid(Argb::new(230, 255, 128, 0)),
         Paint::LinearGradient(LinearGradient::new(1.0, 0.0, 15.0, 0.0, ramp())),
         Paint::RadialGradient(RadialGradient::new(8.0, 8.0, 7.0, ramp()))]
}

fn fill_star(material: &PaintMaterial, gamma: Option<GammaLut>, mask: Option<OpacityMask>,
             transformed: bool) -> PixelBuffer {
    let mut ras = Rasterizer::new();
    let mut buf = PixelBuffer::new(16, 16);
    buf.clear(0xFF204060);
    ras.attach(buf);
    ras.set_paint(material.clone());
    ras.set_gamma(gamma);
    ras.set_mask(mask);
    if transformed {
        ras.set_transform(Transform::from_coefficients(1.0, 0.0, 0.0, 1.0, 0.5, -0.25)).unwrap();
    }
    ras.fill_polygon(&star(), 5, 0).unwrap();
    ras.detach().unwrap()
}

#[test_log::test]
fn every_filler_variant() {
    for paint in paints() {
        for &rule in [FillingRule::NonZero, FillingRule::EvenOdd].iter() {
            for &transformed in [false, true].iter() {
                let what = format!("{} {:?} transformed {}", paint.kind_name(), rule, transformed);
                let material = PaintMaterial::new(paint.clone()).with_rule(rule);

                let plain = fill_star(&material, None, None, transformed);
                let identity = fill_star(&material, Some(GammaLut::identity()), None, transformed);
                assert_eq!(plain.data(), identity.data(), "{}", what);
                let gamma = fill_star(&material, Some(GammaLut::new(2.2)), None, transformed);
                assert_ne!(plain.data(), gamma.data(), "{}", what);

                // The center is wound twice
                let center = plain.get(8, 8);
                match rule {
                    FillingRule::NonZero => assert_ne!(center, 0xFF204060, "{}", what),
                    FillingRule::EvenOdd => assert_eq!(center, 0xFF204060, "{}", what),
                }

                let faded = material.clone().with_opacity(0.5);
                for g in [None, Some(GammaLut::identity()), Some(GammaLut::srgb())].iter() {
                    let masked = fill_star(&material, g.clone(), Some(OpacityMask::uniform(16, 16, 127)), transformed);
                    let scaled = fill_star(&faded, g.clone(), None, transformed);
                    assert_eq!(masked.data(), scaled.data(), "{} gamma {:?}", what, g);
                }
            }
        }
    }
}

#[test]
fn even_odd_mask() {
    let mut ras = Rasterizer::new();
    ras.attach(PixelBuffer::new(16, 16));
    let mut build = |rule| {
        let mut mask = OpacityMask::new(0, 0, 16, 16);
        ras.set_paint(PaintMaterial::default().with_rule(rule));
        ras.begin().unwrap();
        ras.add_polygon(&star(), 5, 0).unwrap();
        ras.finish_to_mask(&mut mask).unwrap();
        mask
    };
    let nz = build(FillingRule::NonZero);
    let eo = build(FillingRule::EvenOdd);
    assert_eq!(nz.value(8, 8), Some(255));
    assert_eq!(eo.value(8, 8), Some(0));
    // The top point of the star is covered once
    assert_ne!(eo.value(8, 3), Some(0));
    assert_eq!(nz.value(8, 3), eo.value(8, 3));
    assert_eq!(eo.value(0, 15), Some(0));
}
