#[derive(serde::Deserialize, Debug, Clone)]
pub struct AxonautConfig {
    #[serde(default = "default_base_url")]
    pub base_url: Box<str>,
    pub api_key: Box<str>,
}

fn default_base_url() -> Box<str> {
    "https://axonaut.com".into()
}
