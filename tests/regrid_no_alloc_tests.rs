use assert_no_alloc::*;
use regrid::{Point, Stage, regrid};

#[cfg(debug_assertions)]
#[global_allocator]
static ALLOC: AllocDisabler = AllocDisabler;

#[test]
fn test_regrid_process_no_alloc() {
    let mut stage = regrid(0, 1_000, 10).unwrap();
    let mut count = 0usize;
    let mut last = Point::default();

    assert_no_alloc(|| {
        for i in 0..100u32 {
            stage.process(&Point::new(i as f64, i * 7), &mut |p: &Point| {
                count += 1;
                last = *p;
            });
        }
    });

    // 7 * 99 = 693 aligns to 700
    assert_eq!(last, Point::new(99.0, 700));
    assert_eq!(count, 71);
}
