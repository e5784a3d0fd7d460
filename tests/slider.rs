use rooftop_solar_sizer::{
    slider::SliderRange,
    units::{convert_area, AreaUnit},
};

#[test]
fn snap_clamps_and_rounds_to_step() {
    let bill = SliderRange::default_bill();
    assert_eq!(bill.snap(1_540.0), 1_500.0);
    assert_eq!(bill.snap(1_560.0), 1_600.0);
    assert_eq!(bill.snap(10.0), 500.0);
    assert_eq!(bill.snap(1e9), 20_000.0);
    assert_eq!(bill.snap(f64::NAN), 500.0);
}

#[test]
fn snap_never_exceeds_max_with_uneven_step() {
    let range = SliderRange::new(0.0, 10.0, 3.0, 0.0);
    assert_eq!(range.snap(10.0), 9.0);
    assert_eq!(range.snap(8.0), 9.0);
    assert_eq!(range.snap(1.4), 0.0);
}

#[test]
fn fraction_reports_position() {
    let area = SliderRange::default_area();
    assert_eq!(area.fraction(100.0), 0.0);
    assert_eq!(area.fraction(2_000.0), 1.0);
    assert!((area.fraction(1_050.0) - 0.5).abs() < 1e-12);
}

#[test]
fn defaults_are_valid() {
    assert!(SliderRange::default_bill().validate().is_ok());
    assert!(SliderRange::default_area().validate().is_ok());
    assert!(SliderRange::new(5.0, 5.0, 1.0, 5.0).validate().is_err());
    assert!(SliderRange::new(0.0, 5.0, 0.0, 0.0).validate().is_err());
    assert!(SliderRange::new(0.0, f64::INFINITY, 1.0, 0.0).validate().is_err());
}

#[test]
fn area_range_maps_to_square_metres() {
    let sq_m = SliderRange::default_area().map(|v| convert_area(v, AreaUnit::SquareFoot, AreaUnit::SquareMeter));
    assert!((sq_m.min - 9.2903).abs() < 1e-9);
    assert!((sq_m.max - 185.806).abs() < 1e-9);
    assert!(sq_m.validate().is_ok());
}

#[test]
fn area_conversion_round_trips() {
    let sq_ft = convert_area(50.0, AreaUnit::SquareMeter, AreaUnit::SquareFoot);
    assert!((sq_ft - 538.196).abs() < 0.001, "{sq_ft}");
    let back = convert_area(sq_ft, AreaUnit::SquareFoot, AreaUnit::SquareMeter);
    assert!((back - 50.0).abs() < 1e-9);
    assert_eq!(convert_area(7.0, AreaUnit::SquareFoot, AreaUnit::SquareFoot), 7.0);
}
