//! 页面渲染 - tera模板与markdown预览

use anyhow::{Result, anyhow};
use serde::Serialize;
use tera::{Context, Tera};

use crate::generator::{Focus, StudySheetPreferences, Tone};

const PAGE_TEMPLATE: &str = "page.html";

/// 下拉框选项
#[derive(Debug, Serialize)]
pub struct OptionView {
    pub label: &'static str,
    pub selected: bool,
}

/// 页面上展示的提示信息
#[derive(Debug, Default, Serialize)]
pub struct Notice {
    /// 本次提交更新了API KEY
    pub key_updated: bool,
    /// 表单校验错误
    pub form_error: Option<String>,
    /// 模型调用失败的原始错误
    pub failure: Option<String>,
}

#[derive(Debug, Serialize)]
struct PageView<'a> {
    key_stored: bool,
    blog_link: &'a str,
    focus_options: Vec<OptionView>,
    tone_options: Vec<OptionView>,
    notice: &'a Notice,
    has_sheet: bool,
    sheet_html: Option<String>,
    download_file_name: &'a str,
}

/// 页面渲染器
pub struct PageRenderer {
    tera: Tera,
    download_file_name: String,
}

impl PageRenderer {
    pub fn new(download_file_name: &str) -> Result<Self> {
        let mut tera = Tera::default();
        // 模板名以.html结尾，tera会自动转义变量
        tera.add_raw_template(PAGE_TEMPLATE, include_str!("../../templates/page.html.tera"))
            .map_err(|e| anyhow!("Failed to register page template: {}", e))?;

        Ok(Self {
            tera,
            download_file_name: download_file_name.to_string(),
        })
    }

    pub fn render(
        &self,
        key_stored: bool,
        preferences: &StudySheetPreferences,
        study_sheet: Option<&str>,
        notice: &Notice,
    ) -> Result<String> {
        let sheet_html = study_sheet.map(render_markdown).transpose()?;

        let view = PageView {
            key_stored,
            blog_link: &preferences.blog_link,
            focus_options: Focus::all()
                .into_iter()
                .map(|focus| OptionView {
                    label: focus.label(),
                    selected: focus == preferences.focus,
                })
                .collect(),
            tone_options: Tone::all()
                .into_iter()
                .map(|tone| OptionView {
                    label: tone.label(),
                    selected: tone == preferences.tone,
                })
                .collect(),
            notice,
            has_sheet: sheet_html.is_some(),
            sheet_html,
            download_file_name: &self.download_file_name,
        };

        let context = Context::from_serialize(&view)
            .map_err(|e| anyhow!("Failed to build page context: {}", e))?;
        self.tera
            .render(PAGE_TEMPLATE, &context)
            .map_err(|e| anyhow!("Failed to render page: {}", e))
    }
}

/// 将学习笔记渲染为HTML，支持GFM表格并允许原始HTML
pub fn render_markdown(source: &str) -> Result<String> {
    let options = markdown::Options {
        parse: markdown::ParseOptions::gfm(),
        compile: markdown::CompileOptions {
            allow_dangerous_html: true,
            ..markdown::CompileOptions::gfm()
        },
    };

    markdown::to_html_with_options(source, &options)
        .map_err(|e| anyhow!("Failed to render markdown: {}", e))
}
