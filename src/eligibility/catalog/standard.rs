use crate::eligibility::profile::EmploymentStatus;
use crate::eligibility::scheme::{
    EligibilityCriteria, RangeBounds, SchemeRecord, SchemeStatus, SchemeType,
};

fn documents(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// National sample schemes used when no catalog source is configured.
pub fn standard_schemes() -> Vec<SchemeRecord> {
    vec![
        SchemeRecord {
            scheme_id: "PM-KISAN".to_string(),
            name: "Pradhan Mantri Kisan Samman Nidhi".to_string(),
            description: "Income support for small and marginal farmers paid in three installments"
                .to_string(),
            scheme_type: Some(SchemeType::Agriculture),
            benefit_amount: 6_000,
            benefit_frequency: Some("annual".to_string()),
            implementing_agency: Some("Ministry of Agriculture and Farmers Welfare".to_string()),
            required_documents: documents(&[
                "Aadhaar Card",
                "Bank Account Details",
                "Land Ownership Documents",
            ]),
            status: SchemeStatus::Active,
            eligibility_criteria: EligibilityCriteria {
                land_ownership: Some(RangeBounds::between(0.1, 2.0)),
                employment_status: Some(vec![EmploymentStatus::Farmer]),
                annual_income: Some(RangeBounds::at_most(200_000.0)),
                ..EligibilityCriteria::default()
            },
        },
        SchemeRecord {
            scheme_id: "MGNREGA".to_string(),
            name: "Mahatma Gandhi National Rural Employment Guarantee Act".to_string(),
            description: "Guaranteed wage employment of one hundred days per household".to_string(),
            scheme_type: Some(SchemeType::Employment),
            benefit_amount: 25_000,
            benefit_frequency: Some("annual".to_string()),
            implementing_agency: Some("Ministry of Rural Development".to_string()),
            required_documents: documents(&["Job Card", "Aadhaar Card"]),
            status: SchemeStatus::Active,
            eligibility_criteria: EligibilityCriteria {
                age: Some(RangeBounds::between(18.0, 65.0)),
                ..EligibilityCriteria::default()
            },
        },
        SchemeRecord {
            scheme_id: "PMAY".to_string(),
            name: "Pradhan Mantri Awas Yojana".to_string(),
            description: "Housing assistance for economically weaker sections".to_string(),
            scheme_type: Some(SchemeType::Housing),
            benefit_amount: 120_000,
            benefit_frequency: Some("one-time".to_string()),
            implementing_agency: Some("Ministry of Housing and Urban Affairs".to_string()),
            required_documents: documents(&["Aadhaar Card", "Income Certificate"]),
            status: SchemeStatus::Active,
            eligibility_criteria: EligibilityCriteria {
                annual_income: Some(RangeBounds::at_most(300_000.0)),
                employment_status: Some(vec![
                    EmploymentStatus::Farmer,
                    EmploymentStatus::Laborer,
                ]),
                ..EligibilityCriteria::default()
            },
        },
        SchemeRecord {
            scheme_id: "PMJAY".to_string(),
            name: "Pradhan Mantri Jan Arogya Yojana".to_string(),
            description: "Health cover of five lakh rupees per family per year".to_string(),
            scheme_type: Some(SchemeType::Healthcare),
            benefit_amount: 500_000,
            benefit_frequency: Some("annual".to_string()),
            implementing_agency: Some("National Health Authority".to_string()),
            required_documents: documents(&["Aadhaar Card", "Ration Card"]),
            status: SchemeStatus::Active,
            eligibility_criteria: EligibilityCriteria {
                annual_income: Some(RangeBounds::at_most(500_000.0)),
                family_size: Some(RangeBounds::at_least(1.0)),
                ..EligibilityCriteria::default()
            },
        },
    ]
}
