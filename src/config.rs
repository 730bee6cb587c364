// config.rs
pub const DEFAULT_SENDER: &str = "\"Treppan Living Prive\" <noreply@treppan.com>";

const DEFAULT_RECIPIENTS: [&str; 3] = [
    "eoi@treppan.com",
    "sales@treppan.com",
    "leads@treppan.com",
];

const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    // SMTP relay
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub smtp_from: Option<String>,
    pub eoi_recipients: Vec<String>,
    // Headless CMS
    pub cms_url: String,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_user: String::new(),
            smtp_pass: String::new(),
            smtp_from: None,
            eoi_recipients: DEFAULT_RECIPIENTS.iter().map(|r| r.to_string()).collect(),
            cms_url: "http://localhost:1337".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:8000".to_string(),
            ],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn init() -> Config {
        let defaults = Config::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        // Email relay configurations (with defaults)
        let smtp_host = std::env::var("SMTP_HOST")
            .unwrap_or(defaults.smtp_host);
        let smtp_port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .unwrap_or(defaults.smtp_port);
        let smtp_user = std::env::var("SMTP_USER")
            .unwrap_or_else(|_| "".to_string());
        let smtp_pass = std::env::var("SMTP_PASS")
            .unwrap_or_else(|_| "".to_string());
        let smtp_from = std::env::var("SMTP_FROM")
            .ok()
            .filter(|from| !from.trim().is_empty());

        let eoi_recipients = std::env::var("EOI_RECIPIENTS")
            .ok()
            .map(|list| split_list(&list))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.eoi_recipients);

        let cms_url = std::env::var("CMS_URL")
            .unwrap_or(defaults.cms_url);
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|list| split_list(&list))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.allowed_origins);
        let max_body_bytes = std::env::var("MAX_BODY_BYTES")
            .ok()
            .and_then(|b| b.parse::<usize>().ok())
            .unwrap_or(defaults.max_body_bytes);

        Config {
            port,
            smtp_host,
            smtp_port,
            smtp_user,
            smtp_pass,
            smtp_from,
            eoi_recipients,
            cms_url,
            allowed_origins,
            max_body_bytes,
        }
    }

    /// Implicit TLS is only used on the SMTPS port; everything else upgrades via STARTTLS.
    pub fn smtp_secure(&self) -> bool {
        self.smtp_port == 465
    }

    pub fn sender(&self) -> &str {
        self.smtp_from.as_deref().unwrap_or(DEFAULT_SENDER)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}
