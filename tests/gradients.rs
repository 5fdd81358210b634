use vecraster::{Rasterizer,PixelBuffer,PaintMaterial,Paint,Argb,Transform};
use vecraster::{LinearGradient,RadialGradient,ColorRamp,GradientStop,Spread};

fn blue(p: u32) -> u32 {
    p & 0xFF
}

fn fill_rect(paint: Paint, w: usize, h: usize, transform: Option<Transform>) -> PixelBuffer {
    let mut ras = Rasterizer::new();
    ras.attach(PixelBuffer::new(w, h));
    ras.set_paint(PaintMaterial::new(paint));
    let (pw, ph) = match transform {
        Some(t) => {
            ras.set_transform(t).unwrap();
            let inv = t.inverted().unwrap();
            inv.transform(w as f64, h as f64)
        },
        None => (w as f64, h as f64),
    };
    ras.fill_polygon(&[0.,0., pw,0., pw,ph, 0.,ph], 4, 0).unwrap();
    ras.detach().unwrap()
}

#[test]
fn linear_ramp() {
    let g = LinearGradient::new(0.0, 0.0, 256.0, 0.0, ColorRamp::two(Argb::black(), Argb::white()));
    let buf = fill_rect(Paint::LinearGradient(g), 256, 2, None);
    assert_eq!(blue(buf.get(0, 0)), 0);
    assert!(blue(buf.get(255, 0)) > 250);
    for x in 1 .. 255 {
        assert!(blue(buf.get(x, 0)) >= blue(buf.get(x - 1, 0)));
        assert_eq!(buf.get(x, 0) >> 24, 0xFF);
    }
    // Constant along y
    assert_eq!(buf.row(0)[.. 200], buf.row(1)[.. 200]);
}

#[test]
fn radial_pad() {
    let g = RadialGradient::new(16.0, 16.0, 8.0, ColorRamp::two(Argb::black(), Argb::white()));
    let buf = fill_rect(Paint::RadialGradient(g), 32, 32, None);
    assert!(blue(buf.get(15, 15)) < 32);
    assert_eq!(buf.get(0, 0), 0xFFFFFFFF);
    assert_eq!(buf.get(30, 2), 0xFFFFFFFF);
    // Symmetric about the center
    assert_eq!(buf.get(10, 15), buf.get(21, 15));
    assert_eq!(buf.get(15, 10), buf.get(15, 21));
}

#[test]
fn elliptical() {
    let g = RadialGradient::elliptical(16.0, 16.0, 16.0, 4.0, ColorRamp::two(Argb::black(), Argb::white()));
    let buf = fill_rect(Paint::RadialGradient(g), 32, 32, None);
    // Further along x than along y before reaching white
    assert!(blue(buf.get(24, 15)) < 255);
    assert_eq!(buf.get(15, 24), 0xFFFFFFFF);
}

#[test]
fn spread_modes() {
    let ramp = ColorRamp::two(Argb::black(), Argb::white());
    let repeat = LinearGradient::new(0.0, 0.0, 10.0, 0.0, ramp.clone()).with_spread(Spread::Repeat);
    let reflect = LinearGradient::new(0.0, 0.0, 10.0, 0.0, ramp).with_spread(Spread::Reflect);
    let r = fill_rect(Paint::LinearGradient(repeat), 40, 1, None);
    let m = fill_rect(Paint::LinearGradient(reflect), 40, 1, None);
    assert_eq!(r.get(3, 0), r.get(13, 0));
    assert_eq!(r.get(3, 0), r.get(23, 0));
    assert_eq!(m.get(3, 0), m.get(16, 0));
    assert_eq!(m.get(3, 0), m.get(23, 0));
}

#[test]
fn multi_stop_ramp() {
    let stops = [GradientStop::new(0.0, Argb::rgb(255, 0, 0)),
                 GradientStop::new(0.5, Argb::rgb(0, 255, 0)),
                 GradientStop::new(1.0, Argb::rgb(0, 0, 255))];
    let g = LinearGradient::new(0.0, 0.0, 100.0, 0.0, ColorRamp::new(&stops));
    let buf = fill_rect(Paint::LinearGradient(g), 100, 1, None);
    assert!(buf.get(0, 0) >> 16 & 0xFF > 240);
    assert!(buf.get(50, 0) >> 8 & 0xFF > 240);
    assert!(buf.get(99, 0) & 0xFF > 240);
}

#[test_log::test]
fn scaled_gradient_follows_the_shape() {
    let g = LinearGradient::new(0.0, 0.0, 50.0, 0.0, ColorRamp::two(Argb::black(), Argb::white()));
    let plain = fill_rect(Paint::LinearGradient(g.clone()), 100, 4, None);
    let scaled = fill_rect(Paint::LinearGradient(g), 100, 4, Some(Transform::from_coefficients(2.0, 0.0, 0.0, 2.0, 0.0, 0.0)));
    // Without the transform the gradient ends half way
    assert_eq!(plain.get(60, 1), 0xFFFFFFFF);
    assert!(blue(scaled.get(60, 1)) < 200);
    assert!(blue(scaled.get(49, 1)) < 140 && blue(scaled.get(49, 1)) > 110);
    assert!(blue(scaled.get(99, 1)) > 250);
}

#[test]
fn rotated_gradient() {
    let g = LinearGradient::new(0.0, 0.0, 0.0, 32.0, ColorRamp::two(Argb::black(), Argb::white()));
    // Quarter turn about the buffer center
    let t = Transform::from_coefficients(0.0, 1.0, -1.0, 0.0, 32.0, 0.0);
    let mut ras = Rasterizer::new();
    ras.attach(PixelBuffer::new(32, 32));
    ras.set_paint(PaintMaterial::new(Paint::LinearGradient(g)));
    ras.set_transform(t).unwrap();
    ras.fill_polygon(&[-8.,-8., 40.,-8., 40.,40., -8.,40.], 4, 0).unwrap();
    let buf = ras.detach().unwrap();
    // Gradient now runs along x, right to left
    assert_eq!(buf.get(5, 3), buf.get(5, 28));
    assert!(blue(buf.get(2, 16)) > blue(buf.get(29, 16)));
}
