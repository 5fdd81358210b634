use vecraster::{Rasterizer,PixelBuffer,PaintMaterial,Paint,Argb,FillingRule};

const BLACK : u32 = 0xFF000000;

fn fill(w: usize, h: usize, pts: &[f64], rule: FillingRule) -> PixelBuffer {
    let mut ras = Rasterizer::new();
    ras.attach(PixelBuffer::new(w, h));
    ras.set_paint(PaintMaterial::new(Paint::solid(Argb::black())).with_rule(rule));
    ras.fill_polygon(pts, pts.len() / 2, 0).unwrap();
    ras.detach().unwrap()
}

fn star() -> Vec<f64> {
    let mut pts = vec![];
    for k in [0, 2, 4, 1, 3].iter() {
        let a = (-90.0 + 72.0 * f64::from(*k)).to_radians();
        pts.push(50.0 + 40.0 * a.cos());
        pts.push(50.0 + 40.0 * a.sin());
    }
    pts
}

#[test]
fn bowtie() {
    let bowtie = [0.,0., 10.,10., 0.,10., 10.,0.];
    let nz = fill(10, 10, &bowtie, FillingRule::NonZero);
    let eo = fill(10, 10, &bowtie, FillingRule::EvenOdd);
    // Lobes wind once, in opposite directions; both rules agree
    assert_eq!(nz.data(), eo.data());
    assert_eq!(nz.get(5, 1), BLACK);
    assert_eq!(nz.get(5, 8), BLACK);
    assert_eq!(nz.get(1, 5), 0);
    assert_eq!(nz.get(8, 5), 0);
}

#[test_log::test]
fn star_center() {
    let pts = star();
    let nz = fill(100, 100, &pts, FillingRule::NonZero);
    let eo = fill(100, 100, &pts, FillingRule::EvenOdd);
    // Center winds twice
    assert_eq!(nz.get(50, 50), BLACK);
    assert_eq!(eo.get(50, 50), 0);
    // Tips wind once
    assert_eq!(nz.get(50, 25), BLACK);
    assert_eq!(eo.get(50, 25), BLACK);
    assert_eq!(nz.get(5, 5), 0);
    assert_eq!(eo.get(5, 5), 0);
}

#[test]
fn overlapping_squares() {
    let mut bufs = vec![];
    for &rule in [FillingRule::NonZero, FillingRule::EvenOdd].iter() {
        let mut ras = Rasterizer::new();
        ras.attach(PixelBuffer::new(12, 12));
        ras.set_paint(PaintMaterial::new(Paint::solid(Argb::black())).with_rule(rule));
        ras.begin().unwrap();
        ras.add_polygon(&[1.,1., 7.,1., 7.,7., 1.,7.], 4, 0).unwrap();
        ras.add_polygon(&[4.,4., 10.,4., 10.,10., 4.,10.], 4, 0).unwrap();
        // Reversed orientation cuts a hole under both rules
        ras.add_polygon(&[2.,2., 2.,3., 3.,3., 3.,2.], 4, 0).unwrap();
        ras.finish().unwrap();
        bufs.push(ras.detach().unwrap());
    }
    let (nz, eo) = (&bufs[0], &bufs[1]);
    assert_eq!(nz.get(5, 5), BLACK);
    assert_eq!(eo.get(5, 5), 0);
    for b in bufs.iter() {
        assert_eq!(b.get(1, 1), BLACK);
        assert_eq!(b.get(8, 8), BLACK);
        assert_eq!(b.get(2, 2), 0);
        assert_eq!(b.get(11, 0), 0);
    }
}
