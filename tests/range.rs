use range_iterator::{FloatRange, Param, RangeError, range};

fn values(start: Option<f64>, end: Option<f64>, step: Option<f64>) -> Vec<f64> {
    range(start, end, step).unwrap().iter().collect()
}

#[test]
fn full_parameters() {
    assert_eq!(values(Some(0.), Some(5.), Some(1.)), [0., 1., 2., 3., 4.]);
}

#[test]
fn negative_full_parameters() {
    assert_eq!(values(Some(0.), Some(-5.), Some(-1.)), [0., -1., -2., -3., -4.]);
}

#[test]
fn explicit_end_below_start_is_empty() {
    assert!(values(Some(0.), Some(-5.), None).is_empty());
}

#[test]
fn single_parameter() {
    assert_eq!(values(Some(5.), None, None), [0., 1., 2., 3., 4.]);
}

#[test]
fn single_negative_parameter_counts_down() {
    assert_eq!(values(Some(-5.), None, None), [0., -1., -2., -3., -4.]);
}

#[test]
fn fractional_step() {
    let r = values(Some(0.), Some(1.), Some(0.1));
    assert_eq!(r.len(), 10);
    for (i, v) in r.iter().enumerate() {
        assert_eq!(*v, i as f64 * 0.1);
    }
}

#[test]
fn start_is_required() {
    assert!(matches!(
        range(None, None, None),
        Err(RangeError::InvalidArgument { param: Param::Start, .. })
    ));
}

#[test]
fn end_must_be_numeric() {
    let err = FloatRange::parse(Some("0"), Some("dafds"), None).unwrap_err();
    assert_eq!(err.param(), Param::End);
    assert!(err.to_string().contains("dafds"));
}

#[test]
fn step_must_be_finite() {
    let err = range(Some(0.), Some(100.), Some(f64::INFINITY)).unwrap_err();
    assert_eq!(err.param(), Param::Step);
}

#[test]
fn cursors_restart() {
    let triples = [
        (0., 5., 1.),
        (0., -5., -1.),
        (1.5, -3., -0.75),
        (0., 1., 0.1),
        (10., 0., 1.),
    ];
    for (start, end, step) in triples {
        let r = FloatRange::new(start, end, step).unwrap();
        let first: Vec<f64> = r.iter().collect();
        let second: Vec<f64> = (&r).into_iter().collect();
        assert_eq!(first, second);
    }
}

#[test]
fn bounded_length_matches_step_count() {
    let triples = [
        (0., 5., 1.),
        (0., 5., 2.),
        (0., -5., -1.5),
        (3., 3., 1.),
        (5., 0., 1.),
        (-2., 2., 0.3),
    ];
    for (start, end, step) in triples {
        let r = FloatRange::new(start, end, step).unwrap();
        let expected = ((end - start) / step).ceil().max(0.) as usize;
        assert_eq!(r.iter().count(), expected, "range({start}, {end}, {step})");
        assert_eq!(r.len(), Some(expected));
    }
}

#[test]
fn infinite_range_is_pulled_lazily() {
    let mut n = 0.;
    for v in FloatRange::to(f64::INFINITY).unwrap() {
        assert_eq!(v, n);
        n += 1.;
        if n == 100. {
            break;
        }
    }
    assert_eq!(n, 100.);
}
