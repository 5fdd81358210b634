use vecraster::{Rasterizer,PixelBuffer,PaintMaterial,Paint,Argb,RasterError,State,ClipBox};

fn ras(w: usize, h: usize) -> Rasterizer {
    let mut ras = Rasterizer::new();
    ras.attach(PixelBuffer::new(w, h));
    ras.set_paint(PaintMaterial::new(Paint::solid(Argb::new(255, 0, 128, 0))));
    ras
}

#[test_log::test]
fn coverage_conserved_per_row() {
    let mut r = ras(40, 40);
    r.begin().unwrap();
    r.add_polygon(&[3.3,2.1, 31.7,5.9, 36.2,33.4, 12.9,37.8, 1.4,20.05], 5, 0).unwrap();
    r.add_polygon(&[10.,10., 20.,30., 30.,10.], 3, 0).unwrap();
    let rows = r.rows();
    let (y0, y1) = rows.touched_range().unwrap();
    assert_eq!((y0, y1), (2, 37));
    for y in y0 ..= y1 {
        let sum : i32 = rows.row_cells(y).map(|c| c.coverage).sum();
        assert_eq!(sum, 0, "row {}", y);
    }
    r.finish_without_filling().unwrap();
    assert!(r.buffer().unwrap().data().iter().all(|&p| p == 0));
    assert!(r.rows().touched_range().is_none());
}

#[test]
fn two_pass_equals_one_pass() {
    let pts = [2.5,1.5, 17.,4., 9.,18.5];
    let mut a = ras(20, 20);
    a.fill_polygon(&pts, 3, 0).unwrap();

    let mut b = ras(20, 20);
    b.begin().unwrap();
    b.move_to(pts[0], pts[1]).unwrap();
    b.line_to(pts[2], pts[3]).unwrap();
    b.line_to(pts[4], pts[5]).unwrap();
    b.close_polygon().unwrap();
    b.finish().unwrap();
    assert_eq!(a.buffer().unwrap().data(), b.buffer().unwrap().data());
}

#[test]
fn illegal_transitions() {
    let mut r = ras(4, 4);
    for res in vec![r.move_to(0.0, 0.0), r.line_to(1.0, 1.0), r.close_polygon(),
                    r.add_polygon(&[0.,0., 1.,0., 1.,1.], 3, 0), r.finish(),
                    r.append_row_data(0, &[])] {
        match res {
            Err(RasterError::InvalidState { state: "idle", .. }) => {},
            other => panic!("unexpected {:?}", other),
        }
    }
    r.begin_with_clip(ClipBox::new(1.0, 1.0, 3.0, 3.0)).unwrap();
    assert!(r.begin().is_err());
    assert!(r.fill_polygon(&[0.,0., 1.,0., 1.,1.], 3, 0).is_err());
    assert_eq!(r.state(), State::Accumulating);
    r.finish().unwrap();
    assert_eq!(r.state(), State::Idle);
}

#[test]
fn clip_box_reported() {
    let mut r = ras(10, 8);
    r.begin_with_clip(ClipBox::new(-5.0, 2.0, 50.0, 6.0)).unwrap();
    let b = r.clip_box();
    assert_eq!((b.x_min, b.y_min, b.y_max), (0.0, 2.0, 6.0));
    assert_eq!(b.x_max, 10.0 - 1.0 / 256.0);
    r.add_polygon(&[0.,0., 10.,0., 10.,8., 0.,8.], 4, 0).unwrap();
    r.finish().unwrap();
    let buf = r.buffer().unwrap();
    assert_eq!(buf.get(4, 1), 0);
    assert_eq!(buf.get(4, 2), 0xFF008000);
    assert_eq!(buf.get(4, 5), 0xFF008000);
    assert_eq!(buf.get(4, 6), 0);
}

#[test]
fn errors_display() {
    let e = RasterError::InvalidState { operation: "finish", state: "idle" };
    assert_eq!(e.to_string(), "Invalid state: cannot finish while idle");
    assert_eq!(RasterError::MissingBuffer.to_string(), "No pixel buffer attached to the rasterizer");
}
