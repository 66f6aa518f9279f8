use itinera_budget::{BaseCost, BudgetEstimate, BudgetInput, parse_items, reconcile_budget};
use itinera_core::BudgetItem;

fn item(category: &str, amount: f64) -> BudgetItem {
    BudgetItem::new(format!("b-{category}"), category, "", amount)
}

/// No extra items: total is the base and the suggestion is the base plus 25%, for any party size.
#[test]
fn test_no_items_total_is_base() {
    for base in [0.0, 1.0, 999.0, 12_500.0, 3_333.33] {
        for travelers in [1, 2, 5] {
            let input = BudgetInput::new(BaseCost::Numeric(base)).with_travelers(travelers);
            let s = reconcile_budget(&input);
            assert_eq!(s.total_cost, base);
            assert_eq!(s.suggested_budget, (base * 1.25).round());
            assert_eq!(s.extra_items_total, 0.0);
        }
    }
}

#[test]
fn test_three_travelers() {
    let input = BudgetInput::new(BaseCost::Numeric(1_000.0))
        .with_travelers(3)
        .with_items(vec![item("yemek", 300.0), item("hediyelik", 300.0)]);
    let s = reconcile_budget(&input);
    assert_eq!(s.extra_items_total, 1_200.0);
    assert_eq!(s.total_cost, 2_200.0);
}

#[test]
fn test_worked_example_items() {
    let input = BudgetInput::new(BaseCost::Numeric(0.0))
        .with_travelers(2)
        .with_items(vec![item("konaklama", 500.0)]);
    assert_eq!(reconcile_budget(&input).total_cost, 1_000.0);

    for travelers in [1, 2, 7] {
        let input = BudgetInput::new(BaseCost::Numeric(0.0))
            .with_travelers(travelers)
            .with_items(vec![item("aktiviteler", 200.0)]);
        assert_eq!(reconcile_budget(&input).total_cost, 200.0);
    }
}

#[test]
fn test_budget_text_end_to_end() {
    let text = "Toplam bütçe: 12.500 TL, günlük yaklaşık 1.800 TL";
    let estimate = BudgetEstimate::parse(text);
    assert_eq!(estimate.total, Some(12_500.0));
    assert_eq!(estimate.daily, Some(1_800.0));

    let items = parse_items("category,amount\nkonaklama,500\n".as_bytes()).unwrap();
    let input = BudgetInput::new(BaseCost::Text(text.to_string()))
        .with_items(items)
        .with_travelers(2)
        .with_duration_days(5);
    let s = reconcile_budget(&input);
    assert_eq!(s.plan_base_cost, 12_500.0);
    assert_eq!(s.total_cost, 13_500.0);
    assert_eq!(s.suggested_budget, 16_875.0);
    assert_eq!(s.daily_cost, 2_700.0);
}

#[test]
fn test_custom_per_person_categories() {
    let input = BudgetInput::new(BaseCost::Numeric(0.0))
        .with_travelers(4)
        .with_per_person_categories(vec!["Müze".to_string()])
        .with_items(vec![item("müze", 100.0), item("konaklama", 100.0)]);
    assert_eq!(reconcile_budget(&input).extra_items_total, 500.0);
}
