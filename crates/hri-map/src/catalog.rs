//! The static semantic field catalog.
//!
//! One entry per HR concept the analyzer understands. Patterns and keywords
//! mix English and Arabic so files from either convention map without an
//! exact vocabulary. Defined once at startup; never derived from input data.

use hri_model::FieldDef;

/// Build the default field catalog.
pub fn default_catalog() -> Vec<FieldDef> {
    vec![
        FieldDef::new(
            "employee_name",
            &["name", "employee.*name", "full.*name", "الاسم", "اسم", "موظف"],
            &["name", "nom", "nombre", "اسم"],
        ),
        FieldDef::new(
            "employee_id",
            &["id", "employee.*id", "emp.*id", "رقم", "معرف", "كود"],
            &["id", "code", "رقم", "معرف"],
        ),
        FieldDef::new(
            "department",
            &["department", "dept", "division", "unit", "قسم", "إدارة"],
            &["dept", "division", "قسم", "إدارة"],
        ),
        FieldDef::new(
            "salary",
            &["salary", "pay", "wage", "income", "راتب", "أجر"],
            &["salary", "pay", "راتب", "أجر"],
        ),
        FieldDef::new(
            "hire_date",
            &["hire.*date", "start.*date", "join.*date", "تاريخ", "تعيين"],
            &["date", "تاريخ", "join", "start"],
        ),
        FieldDef::new(
            "performance_score",
            &["performance", "rating", "score", "evaluation", "أداء", "تقييم"],
            &["perf", "rating", "score", "أداء", "تقييم"],
        ),
        FieldDef::new(
            "position",
            &["position", "job.*title", "role", "title", "منصب", "وظيفة"],
            &["position", "title", "role", "منصب"],
        ),
        FieldDef::new(
            "location",
            &["location", "city", "branch", "موقع", "فرع"],
            &["location", "city", "موقع", "فرع"],
        ),
        FieldDef::new(
            "status",
            &["status", "state", "condition", "حالة", "وضع"],
            &["status", "state", "حالة"],
        ),
        FieldDef::new(
            "manager",
            &["manager", "supervisor", "line.*manager", "مدير", "مشرف"],
            &["manager", "مدير"],
        ),
        FieldDef::new(
            "employment_type",
            &["employment.*type", "contract.*type", "نوع.*عقد", "عقد"],
            &["contract", "عقد"],
        ),
        FieldDef::new(
            "review_date",
            &["review.*date", "appraisal.*date", "مراجعة"],
            &["review", "مراجعة"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn field_keys_are_unique() {
        let catalog = default_catalog();
        let keys: BTreeSet<&str> = catalog.iter().map(|field| field.key.as_str()).collect();
        assert_eq!(keys.len(), catalog.len());
    }

    #[test]
    fn every_field_has_patterns_and_keywords() {
        for field in default_catalog() {
            assert!(!field.patterns.is_empty(), "{} has no patterns", field.key);
            assert!(!field.keywords.is_empty(), "{} has no keywords", field.key);
        }
    }
}
