//! Client core for asking questions about geotagged urban imagery.
//!
//! [`QueryController`] owns the view state and its transitions,
//! [`Presenter`] turns that state into a [`RenderPlan`], and
//! [`HttpAskService`] talks to the analysis service.

pub mod config;
pub mod controller;
pub mod markdown;
pub mod presenter;
pub mod service;

pub use config::{load_settings, ServiceEndpoints, Settings};
pub use controller::{AskPhase, AskSeq, AskStatus, PendingAsk, QueryController, QueryState};
pub use markdown::{CommonMarkRenderer, MarkdownBlock, MarkdownRenderer, RenderedMarkdown};
pub use presenter::{AnswerView, Presenter, RenderPlan, SourceCard, SubmitControl};
pub use service::{AskError, AskService, HttpAskService};
pub use shared::protocol::{AnswerPayload, AskRequest, SourceRecord};
