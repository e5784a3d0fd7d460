use std::collections::{BTreeMap, HashMap};

use rooftop_solar_sizer::{
    display::{render, DisplayTarget, InputSource, OutputSink, Recalculator},
    format::{self, DisplayOptions, Grouping},
    i18n::{keys, Translator},
    sizing::{compute, SizingInput, TariffConstants},
    units::AreaUnit,
};

const UNAVAILABLE: &str = "Unavailable";

fn recalculator(options: DisplayOptions) -> Recalculator {
    Recalculator::new(TariffConstants::default(), options, UNAVAILABLE)
}

#[test]
fn core_targets_are_written_on_every_change() {
    let recalc = recalculator(DisplayOptions::default());
    let mut sink: BTreeMap<DisplayTarget, String> = BTreeMap::new();
    recalc
        .on_input_changed(&SizingInput::new(1500.0, 500.0), &mut sink)
        .expect("sizing");
    assert_eq!(sink.len(), 4);
    assert_eq!(sink[&DisplayTarget::Capacity], "1 kW");
    assert_eq!(sink[&DisplayTarget::Subsidy], "₹30,000");
    assert_eq!(sink[&DisplayTarget::Investment], "₹35,000");
    assert_eq!(sink[&DisplayTarget::Payback], "2.9");

    recalc
        .on_input_changed(&SizingInput::new(6000.0, 1000.0), &mut sink)
        .expect("sizing");
    assert_eq!(sink.len(), 4);
    assert_eq!(sink[&DisplayTarget::Capacity], "6 kW");
    assert_eq!(sink[&DisplayTarget::Subsidy], "₹78,000");
    assert_eq!(sink[&DisplayTarget::Investment], "₹312,000");
    assert_eq!(sink[&DisplayTarget::Payback], "4.3");
}

#[test]
fn breakdown_targets_follow_the_option() {
    let recalc = recalculator(DisplayOptions {
        show_breakdown: true,
        ..DisplayOptions::default()
    });
    let mut sink: HashMap<DisplayTarget, String> = HashMap::new();
    recalc
        .on_input_changed(&SizingInput::new(1500.0, 500.0), &mut sink)
        .expect("sizing");
    assert_eq!(sink.len(), 8);
    assert_eq!(sink[&DisplayTarget::TotalCost], "₹65,000");
    assert_eq!(sink[&DisplayTarget::MonthlyGeneration], "135 kWh");
    assert_eq!(sink[&DisplayTarget::MonthlySavings], "₹1,012.5");
    assert_eq!(sink[&DisplayTarget::YearlySavings], "₹12,150");
}

#[test]
fn failed_sizing_shows_unavailable_everywhere() {
    let constants = TariffConstants {
        tariff_per_unit: 0.0,
        ..TariffConstants::default()
    };
    let recalc = Recalculator::new(constants, DisplayOptions::default(), UNAVAILABLE);
    let mut sink: BTreeMap<DisplayTarget, String> = BTreeMap::new();
    assert!(recalc
        .on_input_changed(&SizingInput::new(1500.0, 500.0), &mut sink)
        .is_err());
    assert_eq!(sink.len(), 4);
    for target in DisplayTarget::CORE {
        assert_eq!(sink[&target], UNAVAILABLE, "{}", target.id());
    }
}

#[test]
fn render_covers_every_target_once() {
    let outcome = compute(SizingInput::new(1500.0, 500.0), &TariffConstants::default());
    let rendered = render(&outcome, &DisplayOptions::default(), UNAVAILABLE);
    assert_eq!(rendered.len(), 8);
    let ids: Vec<&str> = rendered.iter().map(|(t, _)| t.id()).collect();
    assert_eq!(
        ids,
        [
            "capacity",
            "subsidy",
            "investment",
            "payback",
            "total_cost",
            "monthly_generation",
            "monthly_savings",
            "yearly_savings"
        ]
    );
}

/// 슬라이더 두 개를 흉내 내는 입력.
struct Sliders {
    bill: f64,
    area_sq_m: f64,
}

impl InputSource for Sliders {
    fn monthly_bill(&self) -> f64 {
        self.bill
    }

    fn roof_area_sq_ft(&self) -> f64 {
        rooftop_solar_sizer::units::convert_area(self.area_sq_m, AreaUnit::SquareMeter, AreaUnit::SquareFoot)
    }
}

/// 쓰기 횟수를 세는 출력.
#[derive(Default)]
struct CountingSink {
    writes: Vec<(DisplayTarget, String)>,
}

impl OutputSink for CountingSink {
    fn write(&mut self, target: DisplayTarget, text: &str) {
        self.writes.push((target, text.to_string()));
    }
}

#[test]
fn custom_source_and_sink_are_supported() {
    let recalc = recalculator(DisplayOptions::default());
    let mut sink = CountingSink::default();
    // 9.3 m² ≈ 100 sq ft -> 1 kW
    let sliders = Sliders {
        bill: 20_000.0,
        area_sq_m: 9.3,
    };
    let result = recalc.on_input_changed(&sliders, &mut sink).expect("sizing");
    assert_eq!(result.recommended_capacity_kw, 1);
    assert_eq!(sink.writes.len(), 4);
    assert_eq!(sink.writes[0], (DisplayTarget::Capacity, "1 kW".to_string()));
}

#[test]
fn indian_grouping_uses_lakh_separators() {
    assert_eq!(format::group_digits(1_234_567, Grouping::Indian), "12,34,567");
    assert_eq!(format::group_digits(1_234_567, Grouping::Western), "1,234,567");
    assert_eq!(format::group_digits(999, Grouping::Indian), "999");
    assert_eq!(format::group_digits(1_000, Grouping::Indian), "1,000");
    let opts = DisplayOptions {
        grouping: Grouping::Indian,
        ..DisplayOptions::default()
    };
    assert_eq!(format::currency(312_000.0, &opts), "₹3,12,000");
}

#[test]
fn currency_formatting_edges() {
    let opts = DisplayOptions::default();
    assert_eq!(format::currency(0.0, &opts), "₹0");
    assert_eq!(format::currency(-5_000.0, &opts), "-₹5,000");
    assert_eq!(format::currency(1_012.5, &opts), "₹1,012.5");
    assert_eq!(format::currency(99.999, &opts), "₹100");
    let dollars = DisplayOptions {
        currency_symbol: "$".into(),
        ..DisplayOptions::default()
    };
    assert_eq!(format::currency(1_500.0, &dollars), "$1,500");
}

#[test]
fn payback_always_has_one_decimal() {
    assert_eq!(format::payback(3.0), "3.0");
    assert_eq!(format::payback(2.9), "2.9");
    assert_eq!(format::capacity(10), "10 kW");
}

#[test]
fn slider_tooltips() {
    let opts = DisplayOptions::default();
    assert_eq!(format::bill_tooltip(1_500.0, &opts), "₹1,500");
    assert_eq!(format::area_tooltip(500.0, AreaUnit::SquareFoot), "500 sq ft");
    assert_eq!(format::area_tooltip(46.46, AreaUnit::SquareMeter), "46.5 m²");
}

#[test]
fn target_labels_are_translated() {
    let en = Translator::new("en-in");
    assert_eq!(en.t(DisplayTarget::Payback.label_key()), "Payback period (years)");
    assert_eq!(en.t(keys::UNAVAILABLE), "Unavailable");
    let hi = Translator::new("hi-in");
    assert_eq!(hi.t(keys::UNAVAILABLE), "उपलब्ध नहीं");
}
