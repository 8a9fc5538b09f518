//! Projection of [`QueryState`] into what the UI draws.

use shared::protocol::{AnswerPayload, SourceRecord};
use url::Url;

use crate::{
    controller::{AskStatus, QueryState},
    markdown::{CommonMarkRenderer, MarkdownRenderer, RenderedMarkdown},
};

pub const ASK_LABEL: &str = "Ask";
pub const LOADING_LABEL: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub busy: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCard {
    /// 1-based relevance rank.
    pub rank: usize,
    pub image_id: String,
    pub image_url: Option<String>,
    pub caption: String,
    pub tags: Vec<String>,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerView {
    pub narrative: RenderedMarkdown,
    pub sources_heading: String,
    pub sources: Vec<SourceCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub submit: SubmitControl,
    pub error: Option<String>,
    pub answer: Option<AnswerView>,
}

pub struct Presenter<M = CommonMarkRenderer> {
    image_base: Url,
    markdown: M,
}

impl Presenter<CommonMarkRenderer> {
    pub fn new(image_base: Url) -> Self {
        Self::with_renderer(image_base, CommonMarkRenderer)
    }
}

impl<M: MarkdownRenderer> Presenter<M> {
    pub fn with_renderer(image_base: Url, markdown: M) -> Self {
        Self {
            image_base,
            markdown,
        }
    }

    pub fn image_base(&self) -> &Url {
        &self.image_base
    }

    pub fn present(&self, state: &QueryState) -> RenderPlan {
        let busy = state.is_loading();
        let submit = SubmitControl {
            enabled: !busy,
            busy,
            label: if busy { LOADING_LABEL } else { ASK_LABEL },
        };

        let (error, answer) = match &state.status {
            AskStatus::Idle | AskStatus::Loading => (None, None),
            AskStatus::Failed(message) => (Some(message.clone()), None),
            AskStatus::Succeeded(payload) => (None, Some(self.answer_view(payload))),
        };

        RenderPlan {
            submit,
            error,
            answer,
        }
    }

    fn answer_view(&self, payload: &AnswerPayload) -> AnswerView {
        AnswerView {
            narrative: self.markdown.render(&payload.narrative),
            sources_heading: format!("Sources ({}):", payload.source_count()),
            sources: payload
                .sources
                .iter()
                .enumerate()
                .map(|(idx, record)| self.source_card(idx + 1, record))
                .collect(),
        }
    }

    fn source_card(&self, rank: usize, record: &SourceRecord) -> SourceCard {
        SourceCard {
            rank,
            image_id: record.image_id.clone(),
            image_url: image_url(&self.image_base, &record.image_path),
            caption: record.caption.clone(),
            tags: record.tags.clone(),
            location: record.location.clone(),
        }
    }
}

/// Image route URL for the final segment of a server-relative `image_path`.
pub fn image_url(image_base: &Url, image_path: &str) -> Option<String> {
    let filename = image_path.rsplit('/').next().unwrap_or_default();
    if matches!(filename, "" | "." | "..") {
        return None;
    }

    let mut url = image_base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(filename);
    Some(url.into())
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
