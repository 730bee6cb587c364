use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsMedia {
    pub url: String,
    #[serde(default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl CmsMedia {
    /// CMS uploads come back relative to the CMS host.
    pub fn resolve_url(&mut self, base_url: &str) {
        if self.url.is_empty() || self.url.starts_with("http") {
            return;
        }
        self.url = format!("{}{}", base_url.trim_end_matches('/'), self.url);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatItem {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitItem {
    pub title: String,
    pub size: String,
    pub count: u32,
    #[serde(default)]
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperInfo {
    pub name: String,
    pub address: String,
    pub telephone: String,
    pub email: String,
    pub rera_number: String,
    #[serde(default)]
    pub logo: Option<CmsMedia>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EoiStep {
    pub step: String,
    #[serde(default)]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesManager {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionIcon {
    User,
    Building,
    Dollar,
    Users,
    Briefcase,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub icon: Option<SectionIcon>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub is_optional: Option<bool>,
}

// Singleton documents

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub tagline: String,
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub description: Option<String>,
    pub button_text: String,
    #[serde(default)]
    pub background_image: Option<CmsMedia>,
    #[serde(default)]
    pub stats: Vec<StatItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewContent {
    pub section_title: String,
    pub total_units_label: String,
    pub total_units: u32,
    pub project_name: String,
    #[serde(default)]
    pub units: Vec<UnitItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EoiFormContent {
    pub section_title: String,
    pub deposit_amount: String,
    #[serde(default)]
    pub deposit_description: Option<String>,
    #[serde(default)]
    pub developer_info: Option<DeveloperInfo>,
    #[serde(default)]
    pub eoi_steps: Vec<EoiStep>,
    pub process_description: String,
    pub unit_allocation_note: String,
    pub refund_note: String,
    pub terms_and_conditions: String,
    #[serde(default)]
    pub down_payment_options: Vec<DropdownOption>,
    #[serde(default)]
    pub unit_number_options: Vec<DropdownOption>,
    #[serde(default)]
    pub sales_managers: Vec<SalesManager>,
    #[serde(default)]
    pub form_sections: Vec<FormSection>,
}

impl EoiFormContent {
    /// Names offered in the sales-manager dropdown; entries without an explicit flag count as active.
    pub fn active_sales_managers(&self) -> Vec<&str> {
        self.sales_managers
            .iter()
            .filter(|m| m.is_active != Some(false))
            .map(|m| m.name.as_str())
            .collect()
    }
}

/// Everything the landing page needs from the CMS, one field per singleton document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub hero: HeroContent,
    pub overview: OverviewContent,
    pub eoi_form: EoiFormContent,
}

impl PageContent {
    pub fn resolve_media_urls(&mut self, base_url: &str) {
        if let Some(image) = self.hero.background_image.as_mut() {
            image.resolve_url(base_url);
        }
        if let Some(logo) = self
            .eoi_form
            .developer_info
            .as_mut()
            .and_then(|info| info.logo.as_mut())
        {
            logo.resolve_url(base_url);
        }
    }
}

const PROJECT_NAME: &str = "Treppan Living Prive";
const DEVELOPER_NAME: &str = "Fakhruddin Properties";

impl Default for HeroContent {
    fn default() -> Self {
        HeroContent {
            tagline: "Luxury Living Experience".to_string(),
            title: PROJECT_NAME.to_string(),
            subtitle: "Expression of Interest".to_string(),
            description: Some(
                "This EOI is simply a declaration of interest to purchase a property within the Project \
                 and is not intended to create a legally binding contract."
                    .to_string(),
            ),
            button_text: "Express Interest".to_string(),
            background_image: None,
            stats: Vec::new(),
        }
    }
}

impl Default for OverviewContent {
    fn default() -> Self {
        let unit = |title: &str, size: &str, count: u32| UnitItem {
            title: title.to_string(),
            size: size.to_string(),
            count,
            price: String::new(),
        };

        OverviewContent {
            section_title: "Luxury Residences".to_string(),
            total_units_label: "Total Available".to_string(),
            total_units: 2,
            project_name: PROJECT_NAME.to_string(),
            units: vec![
                unit("1 Bed Suite", "1,028 sq ft - 1,103 sq ft", 20),
                unit("2 Bed Suite", "1,617 sq ft - 2,127 sq ft", 43),
                unit("4 Bed Penthouse", "3,592 sq ft - 3,647 sq ft", 2),
            ],
        }
    }
}

const EOI_STEPS: [&str; 6] = [
    "The EOI Deposit Cheque will not be cashed and is fully refundable should a Client choose not to proceed with booking a Unit in the Project.",
    "An acknowledgement receipt for the EOI Deposit Cheque will be issued by Fakhruddin Properties.",
    "The EOI Deposit Cheque should mention Fakhruddin Properties as the beneficiary.",
    "The EOI Form should be duly filled with the correct contact information of the Client.",
    "Any EOI submission missing the above-mentioned documents or information will not be accepted.",
    "Units will be allocated on a priority basis for Clients ready to complete full payment for their units, followed by higher down payments until reaching the standard payment terms.",
];

const TERMS_AND_CONDITIONS: &str = "\
The Developer has called any interested person/s or company (the \"Interested Party\") to reserve and later purchase some of the proposed properties within the Project, the parties will then proceed to a formal booking form/sale and purchase agreement. The full terms and conditions for the purchase and ownership of the Property will be contained in the sale and purchase agreement with related documents as may be required under relevant Dubai laws (together the \"SPA\").

The information mentioned above is not an offer or a contract and does not constitute an interest in land. The purpose of this EOI is to provide the Developer's customers with an opportunity to express an interest within the Project prior to the official launch.

The completion and submission of this EOI (and the EOI Amount) in no way obligates the Developer to sell the Property to the Purchaser.

The Developer reserves the right to amend or cancel this EOI at any time prior to entering into a formal booking form/SPA. In the event that this EOI is cancelled by the Developer, the cheque for the EOI Amount shall be returned to the Interested Party as soon as reasonably practicable.

The Interested Party reserves the right to cancel this EOI at any time prior to entering into a formal booking form/SPA, in which case the cheque for the EOI Amount shall be returned as soon as reasonably practicable.

This EOI is personal to the Interested Party and is not assignable or transferable without the express written consent of the Developer.";

const SALES_MANAGERS: [&str; 5] = [
    "Ahmed Al Maktoum",
    "Sarah Johnson",
    "Mohammed Rashid",
    "Fatima Al Nahyan",
    "James Wilson",
];

impl Default for EoiFormContent {
    fn default() -> Self {
        let option = |value: &str, label: &str| DropdownOption {
            value: value.to_string(),
            label: label.to_string(),
            is_default: None,
        };
        let section = |title: &str, subtitle: &str, icon: SectionIcon, order: u32, optional: bool| FormSection {
            title: title.to_string(),
            subtitle: Some(subtitle.to_string()),
            icon: Some(icon),
            order: Some(order),
            is_optional: optional.then_some(true),
        };

        EoiFormContent {
            section_title: "Expression of Interest Form".to_string(),
            deposit_amount: "AED 50,000 (Fifty Thousand Dirhams)".to_string(),
            deposit_description: Some(
                "This amount is refundable if you choose not to proceed".to_string(),
            ),
            developer_info: Some(DeveloperInfo {
                name: DEVELOPER_NAME.to_string(),
                address: "Office 123, ABC DEF AAAA 3, Dubai, UAE".to_string(),
                telephone: "+971 1 234 5678 or 800 ABCD (7236)".to_string(),
                email: "EOI@fakhruddinproperties.com".to_string(),
                rera_number: "1234".to_string(),
                logo: None,
            }),
            eoi_steps: EOI_STEPS
                .iter()
                .map(|step| EoiStep {
                    step: step.to_string(),
                    order: None,
                })
                .collect(),
            process_description: "The Interested Party should submit a EOI Deposit Cheque in favour of \
                Fakhruddin Properties within 5 working days of completing this EOI Form in order to finalize their EOI."
                .to_string(),
            unit_allocation_note: "Upon confirmation of Unit Allocation for successful EOIs, the Interested Party \
                must complete payment of 10% of the Property Purchase Price and submit all required documents and \
                information requested by Fakhruddin Properties."
                .to_string(),
            refund_note: "Should the Interested Party choose not to proceed with booking a Unit in the Project, \
                the EOI Deposit Cheque will be returned to the Interested Party within 5 working days."
                .to_string(),
            terms_and_conditions: TERMS_AND_CONDITIONS.to_string(),
            down_payment_options: vec![
                option("100", "100%"),
                option("50", "50%"),
                option("20", "20%"),
            ],
            unit_number_options: (1..=5)
                .map(|n| option(&n.to_string(), &n.to_string()))
                .collect(),
            sales_managers: SALES_MANAGERS
                .iter()
                .map(|name| SalesManager {
                    name: name.to_string(),
                    email: None,
                    phone: None,
                    is_active: Some(true),
                })
                .collect(),
            form_sections: vec![
                section("Interested Party", "Primary applicant details", SectionIcon::User, 1, false),
                section("Unit Preferences", "Select your preferred options", SectionIcon::Building, 2, false),
                section("EOI Value", "Expression of Interest deposit amount", SectionIcon::Dollar, 3, false),
                section("Fakhruddin Sales Manager", "Select your assigned sales manager", SectionIcon::Users, 4, false),
                section("Agency Information", "If applicable, provide agency details", SectionIcon::Briefcase, 5, true),
            ],
        }
    }
}
