use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tokio::sync::Mutex;

/// Writing voices the article can be rewritten in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    FirstTimeMom,
    PediatricNurse,
    HumorousDad,
    VeteranBlogger,
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::FirstTimeMom,
        Persona::PediatricNurse,
        Persona::HumorousDad,
        Persona::VeteranBlogger,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Persona::FirstTimeMom => "剛當媽媽一年、語氣溫柔真誠、常分享自己手忙腳亂經驗的新手媽咪",
            Persona::PediatricNurse => "在小兒科服務十年、說明清楚有條理、重視安全與衛教知識的護理師",
            Persona::HumorousDad => "幽默風趣、愛自嘲、用輕鬆口吻分享育兒崩潰日常的全職奶爸",
            Persona::VeteranBlogger => "養過三個孩子、擅長整理懶人包與好物清單的資深育兒部落客",
        }
    }
}

/// Uniform persona picker. Seeded selectors give a reproducible sequence.
pub struct PersonaSelector {
    rng: Mutex<StdRng>,
}

impl PersonaSelector {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub async fn pick(&self) -> Persona {
        let mut rng = self.rng.lock().await;
        let persona = Persona::ALL
            .choose(&mut *rng)
            .copied()
            .unwrap_or(Persona::FirstTimeMom);
        persona
    }
}

#[derive(Debug)]
pub struct ArticlePrompt<'a> {
    title: &'a str,
    summary: &'a str,
    link: &'a str,
    persona: Option<Persona>,
}

impl<'a> ArticlePrompt<'a> {
    pub fn new(title: &'a str, summary: &'a str, link: &'a str) -> Self {
        Self {
            title,
            summary,
            link,
            persona: None,
        }
    }

    pub fn with_persona(mut self, persona: Option<Persona>) -> Self {
        self.persona = persona;
        self
    }

    pub fn build(&self) -> String {
        let title = self.title;
        let summary = self.summary;
        let link = self.link;

        let persona = match self.persona {
            Some(persona) => format!(
                "\n【寫作人設】請以「{}」的身分與口吻撰寫全文。\n",
                persona.description()
            ),
            None => String::new(),
        };

        format!(
            r#"任務：將以下新聞改寫成「繁體中文」的「育兒知識/媽咪推薦」風格文章。
{persona}
【新聞標題】{title}
【新聞摘要】{summary}

【SEO 關鍵字策略 (標題必填)】
1. 標題必須包含：育兒神器、媽媽社團推薦、寶寶健康、懶人包 (擇一使用)。
2. 標題範例：「{title}？新手爸媽必看的3個重點」。

【內文結構】
1. **同理心開頭**：理解帶小孩的辛苦。
2. **知識分享**：提供育兒建議。
3. **中段廣告**：在第二段結束後，插入一句「💡 媽咪們都在搶的育兒好物 (點此查看)」，並設為超連結({link})。
4. **實用建議**：如何解決問題。
5. **結尾**：為爸媽加油打氣。

【回傳 JSON】: {{"category": "育兒日記", "html_body": "HTML內容"}}
【文末按鈕】: {button}"#,
            button = cta_button(link),
        )
    }
}

fn cta_button(link: &str) -> String {
    format!(
        r#"<br><div style="text-align:center;margin:30px;"><a href="{link}" style="background:#FF69B4;color:white;padding:15px 30px;text-decoration:none;border-radius:50px;font-weight:bold;">👶 媽咪推薦好物 (限時優惠)</a></div>"#
    )
}
