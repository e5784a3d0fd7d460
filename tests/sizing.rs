use rooftop_solar_sizer::{
    sizing::{
        compute, LimitingFactor, SizingError, SizingInput, SubsidyTable, SubsidyTableError, SubsidyTier,
        TariffConstants,
    },
    units::AreaUnit,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn small_bill_gets_minimum_system() {
    let r = compute(SizingInput::new(1500.0, 500.0), &TariffConstants::default()).expect("sizing");
    assert_eq!(r.required_kw, 1);
    assert_eq!(r.max_kw_by_roof, 5);
    assert_eq!(r.recommended_capacity_kw, 1);
    assert_eq!(r.subsidy_rupees, 30_000);
    assert_eq!(r.total_cost_rupees, 65_000);
    assert_eq!(r.investment_rupees, 35_000);
    assert!(approx(r.monthly_units_kwh, 200.0));
    assert!(approx(r.monthly_generation_kwh, 135.0));
    assert!(approx(r.monthly_savings_rupees, 1012.5));
    assert!(approx(r.yearly_savings_rupees, 12_150.0));
    assert!(approx(r.payback_years, 2.9), "payback={}", r.payback_years);
    assert_eq!(r.limiting_factor(), LimitingFactor::Consumption);
}

#[test]
fn large_bill_hits_top_subsidy_tier() {
    let r = compute(SizingInput::new(6000.0, 1000.0), &TariffConstants::default()).expect("sizing");
    assert_eq!(r.required_kw, 6);
    assert_eq!(r.max_kw_by_roof, 10);
    assert_eq!(r.recommended_capacity_kw, 6);
    assert_eq!(r.subsidy_rupees, 78_000);
    assert_eq!(r.total_cost_rupees, 390_000);
    assert_eq!(r.investment_rupees, 312_000);
    assert!(approx(r.yearly_savings_rupees, 72_900.0));
    assert!(approx(r.payback_years, 4.3), "payback={}", r.payback_years);
}

#[test]
fn small_roof_limits_capacity() {
    let r = compute(SizingInput::new(20_000.0, 150.0), &TariffConstants::default()).expect("sizing");
    assert_eq!(r.required_kw, 20);
    assert_eq!(r.max_kw_by_roof, 1);
    assert_eq!(r.recommended_capacity_kw, 1);
    assert_eq!(r.limiting_factor(), LimitingFactor::RoofArea);
}

#[test]
fn capacity_never_drops_below_one_kw() {
    let constants = TariffConstants::default();
    // 500 / 7.5 = 66.7 kWh -> 0.49 kW -> 0, 지붕 50 sq ft -> 0
    for (bill, area) in [(500.0, 500.0), (20_000.0, 50.0), (0.0, 0.0), (-100.0, -10.0)] {
        let r = compute(SizingInput::new(bill, area), &constants).expect("sizing");
        assert_eq!(r.recommended_capacity_kw, 1, "bill={bill} area={area}");
        assert_eq!(r.subsidy_rupees, 30_000);
        assert_eq!(r.limiting_factor(), LimitingFactor::MinimumCapacity);
    }
}

#[test]
fn required_capacity_rounds_half_away_from_zero() {
    let constants = TariffConstants::default();
    // 2.5 kW 정확히: 2.5 * 135 * 7.5 = 2531.25
    let r = compute(SizingInput::new(2531.25, 2000.0), &constants).expect("sizing");
    assert_eq!(r.required_kw, 3);
    let r = compute(SizingInput::new(2531.0, 2000.0), &constants).expect("sizing");
    assert_eq!(r.required_kw, 2);
}

#[test]
fn roof_capacity_rounds_down() {
    let r = compute(SizingInput::new(20_000.0, 399.9), &TariffConstants::default()).expect("sizing");
    assert_eq!(r.max_kw_by_roof, 3);
    assert_eq!(r.recommended_capacity_kw, 3);
    assert_eq!(r.subsidy_rupees, 78_000);
}

#[test]
fn subsidy_is_a_step_function_of_capacity() {
    let table = SubsidyTable::default();
    assert_eq!(table.subsidy_for(0), None);
    assert_eq!(table.subsidy_for(1), Some(30_000));
    assert_eq!(table.subsidy_for(2), Some(60_000));
    assert_eq!(table.subsidy_for(3), Some(78_000));
    assert_eq!(table.subsidy_for(10), Some(78_000));
    assert_eq!(table.subsidy_for(u32::MAX), Some(78_000));
}

#[test]
fn same_input_gives_identical_result() {
    let constants = TariffConstants::default();
    let input = SizingInput::new(3300.0, 750.0);
    let first = compute(input, &constants);
    let second = compute(input, &constants);
    assert_eq!(first, second);
}

#[test]
fn metric_area_is_converted_before_sizing() {
    // 40 m² ≈ 430.6 sq ft
    let input = SizingInput::with_area_unit(1500.0, 40.0, AreaUnit::SquareMeter);
    assert!((input.roof_area_sq_ft - 430.56).abs() < 0.01, "{}", input.roof_area_sq_ft);
    let r = compute(input, &TariffConstants::default()).expect("sizing");
    assert_eq!(r.max_kw_by_roof, 4);
}

#[test]
fn zero_divisor_constants_are_reported() {
    for (field, constants) in [
        (
            "tariff_per_unit",
            TariffConstants {
                tariff_per_unit: 0.0,
                ..TariffConstants::default()
            },
        ),
        (
            "generation_per_kw_per_month",
            TariffConstants {
                generation_per_kw_per_month: 0.0,
                ..TariffConstants::default()
            },
        ),
        (
            "roof_area_per_kw",
            TariffConstants {
                roof_area_per_kw: -1.0,
                ..TariffConstants::default()
            },
        ),
        (
            "cost_per_kw",
            TariffConstants {
                cost_per_kw: f64::NAN,
                ..TariffConstants::default()
            },
        ),
    ] {
        match compute(SizingInput::new(1500.0, 500.0), &constants) {
            Err(SizingError::InvalidConstant { name, .. }) => assert_eq!(name, field),
            other => panic!("{field}: unexpected {other:?}"),
        }
    }
}

#[test]
fn non_finite_inputs_are_rejected() {
    let constants = TariffConstants::default();
    assert_eq!(
        compute(SizingInput::new(f64::NAN, 500.0), &constants),
        Err(SizingError::NonFiniteInput("monthly_bill_rupees"))
    );
    assert_eq!(
        compute(SizingInput::new(1500.0, f64::INFINITY), &constants),
        Err(SizingError::NonFiniteInput("roof_area_sq_ft"))
    );
}

#[test]
fn vanishing_savings_give_no_payback() {
    // 두 상수가 모두 양수여도 곱이 0으로 언더플로되면 회수기간을 낼 수 없다.
    let constants = TariffConstants {
        tariff_per_unit: 1e-300,
        generation_per_kw_per_month: 1e-300,
        ..TariffConstants::default()
    };
    assert_eq!(
        compute(SizingInput::new(1500.0, 500.0), &constants),
        Err(SizingError::ZeroYearlySavings)
    );
}

#[test]
fn subsidy_above_cost_is_an_error() {
    let constants = TariffConstants {
        cost_per_kw: 10_000.0,
        ..TariffConstants::default()
    };
    assert_eq!(
        compute(SizingInput::new(1500.0, 500.0), &constants),
        Err(SizingError::SubsidyExceedsCost {
            subsidy: 30_000,
            total_cost: 10_000,
        })
    );
}

#[test]
fn custom_tiers_are_sorted_and_applied() {
    let table = SubsidyTable::new(vec![
        SubsidyTier { min_kw: 5, amount_rupees: 100_000 },
        SubsidyTier { min_kw: 1, amount_rupees: 20_000 },
    ])
    .expect("table");
    assert_eq!(table.tiers()[0].min_kw, 1);
    let constants = TariffConstants {
        subsidy_tiers: table,
        ..TariffConstants::default()
    };
    let r = compute(SizingInput::new(6000.0, 1000.0), &constants).expect("sizing");
    assert_eq!(r.subsidy_rupees, 100_000);
    let r = compute(SizingInput::new(3000.0, 1000.0), &constants).expect("sizing");
    assert_eq!(r.recommended_capacity_kw, 3);
    assert_eq!(r.subsidy_rupees, 20_000);
}

#[test]
fn malformed_tier_tables_are_rejected() {
    assert_eq!(SubsidyTable::new(vec![]), Err(SubsidyTableError::Empty));
    assert_eq!(
        SubsidyTable::new(vec![SubsidyTier { min_kw: 0, amount_rupees: 1 }]),
        Err(SubsidyTableError::ZeroMinimum)
    );
    assert_eq!(
        SubsidyTable::new(vec![SubsidyTier { min_kw: 2, amount_rupees: 1 }]),
        Err(SubsidyTableError::MissingBaseTier(2))
    );
    assert_eq!(
        SubsidyTable::new(vec![
            SubsidyTier { min_kw: 1, amount_rupees: 1 },
            SubsidyTier { min_kw: 3, amount_rupees: 2 },
            SubsidyTier { min_kw: 3, amount_rupees: 3 },
        ]),
        Err(SubsidyTableError::Duplicate(3))
    );
}

#[test]
fn cost_beyond_integer_range_is_rejected() {
    let constants = TariffConstants {
        cost_per_kw: 1e19,
        ..TariffConstants::default()
    };
    match compute(SizingInput::new(1500.0, 500.0), &constants) {
        Err(SizingError::InvalidConstant { name, value }) => {
            assert_eq!(name, "cost_per_kw");
            assert_eq!(value, 1e19);
        }
        other => panic!("unexpected {other:?}"),
    }

    let constants = TariffConstants {
        cost_per_kw: 1e18,
        ..TariffConstants::default()
    };
    let r = compute(SizingInput::new(1500.0, 500.0), &constants).expect("sizing");
    assert_eq!(r.total_cost_rupees, 1_000_000_000_000_000_000);
    assert_eq!(r.investment_rupees, 1_000_000_000_000_000_000 - 30_000);
    assert!(r.investment_rupees > 0);
}
