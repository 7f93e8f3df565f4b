pub const DEFAULT_RSS_URL: &str =
    "https://news.google.com/rss/search?q=parenting+tips+newborn&hl=en-US&gl=US&ceid=US:en";

pub const DEFAULT_LLM_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

pub const DEFAULT_ROUTE_KEY: &str = "default";
pub const DEFAULT_AFFILIATE_URL: &str = "https://s.shopee.tw/5L4eMZYBES";
pub const AFFILIATE_ROUTES: &[(&str, &str)] = &[
    ("diaper", "https://s.shopee.tw/5VO4YsXXtV"),
    ("milk", "https://s.shopee.tw/5fhUlBWuYY"),
    ("toy", "https://s.shopee.tw/5q0uxUWHDb"),
    ("baby", "https://s.shopee.tw/9zqTv9GPlQ"),
];

pub const IMAGE_ENDPOINT: &str = "https://image.pollinations.ai/prompt";
pub const IMAGE_STYLE: &str = "cute baby, soft pastel colors, disney style, 8k";
pub const IMAGE_WIDTH: u32 = 1024;
pub const IMAGE_HEIGHT: u32 = 600;
pub const IMAGE_MODEL: &str = "flux";

pub const DEFAULT_CATEGORY: &str = "育兒日記";
pub const FALLBACK_CATEGORY: &str = "育兒快訊";
pub const FALLBACK_LINK_TEXT: &str = "👉 查看媽咪推薦好物";
