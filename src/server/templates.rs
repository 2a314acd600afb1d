//! HTML pages, compiled into the binary.

use serde::Serialize;
use tera::{Context, Tera};

const INDEX: &str = "index.html";
const RESULT: &str = "result.html";

/// Rendered pages of the form front-end.
#[derive(Debug, Clone)]
pub struct Templates {
    tera: Tera,
}

#[derive(Serialize)]
struct ResultPage<'a> {
    username: &'a str,
    mbti: String,
    post_count: usize,
}

impl Templates {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (INDEX, include_str!("../../templates/index.html")),
            (RESULT, include_str!("../../templates/result.html")),
        ])?;
        Ok(Self { tera })
    }

    pub fn render_index(&self) -> tera::Result<String> {
        self.tera.render(INDEX, &Context::new())
    }

    /// `mbti` is either a code or the no-data message.
    pub fn render_result(
        &self,
        username: &str,
        mbti: &str,
        post_count: usize,
    ) -> tera::Result<String> {
        let page = ResultPage {
            username,
            mbti: mbti.to_string(),
            post_count,
        };
        self.tera.render(RESULT, &Context::from_serialize(page)?)
    }
}
