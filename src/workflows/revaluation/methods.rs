use super::domain::BaseType;

const OTHER_METHODS: &[&str] = &["Независимая оценка", "Рыночная стоимость"];

const REVALUATION_METHODS: &[(BaseType, &[&str])] = &[
    (
        BaseType::RealEstate,
        &[
            "Независимая оценка",
            "Кадастровая стоимость",
            "Рыночная оценка",
            "Сравнительный подход",
        ],
    ),
    (
        BaseType::Transport,
        &[
            "Независимая оценка",
            "Рыночная стоимость",
            "Справочная стоимость",
            "Оценка по аналогам",
        ],
    ),
    (
        BaseType::Equipment,
        &[
            "Независимая оценка",
            "Остаточная стоимость",
            "Рыночная стоимость",
            "Оценка по аналогам",
        ],
    ),
    (
        BaseType::Goods,
        &[
            "Рыночная стоимость",
            "Справочная стоимость",
            "Оценка по аналогам",
        ],
    ),
    (
        BaseType::Securities,
        &["Рыночная котировка", "Оценка по аналогам"],
    ),
    (BaseType::Shares, &["Независимая оценка", "Оценка по аналогам"]),
    (
        BaseType::PropertyRights,
        &["Независимая оценка", "Оценка по аналогам"],
    ),
    (BaseType::Other, OTHER_METHODS),
];

/// Valuation methods available for a base type; unknown or empty entries use
/// the `Прочее` list.
pub fn methods_for(base_type: BaseType) -> &'static [&'static str] {
    REVALUATION_METHODS
        .iter()
        .find(|(candidate, methods)| *candidate == base_type && !methods.is_empty())
        .map(|(_, methods)| *methods)
        .unwrap_or(OTHER_METHODS)
}

/// Round-robin over the method list by the record's position in the input.
pub fn select_method(base_type: BaseType, sequence_index: usize) -> &'static str {
    let methods = methods_for(base_type);
    methods[sequence_index % methods.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_estate_rotates_through_four_methods() {
        let methods = methods_for(BaseType::RealEstate);
        assert_eq!(methods.len(), 4);

        let picked: Vec<_> = (0..5)
            .map(|index| select_method(BaseType::RealEstate, index))
            .collect();
        assert_eq!(
            picked,
            vec![methods[0], methods[1], methods[2], methods[3], methods[0]]
        );
    }

    #[test]
    fn every_base_type_has_methods() {
        for base_type in BaseType::ordered() {
            assert!(!methods_for(base_type).is_empty(), "{base_type}");
        }
    }

    #[test]
    fn other_uses_fallback_list() {
        assert_eq!(select_method(BaseType::Other, 0), "Независимая оценка");
        assert_eq!(select_method(BaseType::Other, 3), "Рыночная стоимость");
    }
}
