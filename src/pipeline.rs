//! List-resolution pipeline.
//!
//! A pipeline owns the reference rows for one [`Shape`]. Selecting a row moves
//! it to [`Phase::Loading`] and yields a [`ResolveRequest`]; the request is
//! resolved off the UI (see [`resolve`]) and handed back through
//! [`ListPipeline::complete`], which notifies the [`Presenter`] once and
//! returns to [`Phase::Idle`].

use serde::{Deserialize, Serialize};

use crate::client::{FetchError, HttpTransport, ServiceClient};
use crate::decode::DecodeError;
use crate::detail::{Detail, Displayable};
use crate::extract::{DetailsOption, ReferenceSummary};
use crate::pokemon::Pokemon;
use crate::resources::{decode_record, Resource, Shape};

/// Why resolving a reference failed. Displays as the user-facing message.
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum PipelineError {
    #[error("row {row} is out of range ({len} references)")]
    RowOutOfRange { row: usize, len: usize },
}

/// Receives pipeline notifications. Implemented by whatever renders them.
pub trait Presenter {
    fn on_loading_started(&mut self);
    fn on_resolved(&mut self, sections: Vec<Detail>, title: String);
    fn on_failed(&mut self, message: String);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Loading {
        request_id: u64,
        row: usize,
    },
}

/// One in-flight resolution, issued by [`ListPipeline::select`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub id: u64,
    pub shape: Shape,
    pub row: usize,
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPipeline {
    shape: Shape,
    items: Vec<ReferenceSummary>,
    phase: Phase,
    issued: u64,
}

impl ListPipeline {
    pub fn new(shape: Shape, items: Vec<ReferenceSummary>) -> Self {
        Self {
            shape,
            items,
            phase: Phase::Idle,
            issued: 0,
        }
    }

    /// The pipeline behind one details option of `pokemon`.
    pub fn for_option(option: DetailsOption, pokemon: &Pokemon) -> Self {
        Self::new(option.shape(), option.extract(pokemon))
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn items(&self) -> &[ReferenceSummary] {
        &self.items
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// Start resolving `row`.
    ///
    /// Does not refuse a selection made while another is loading; the newer
    /// request supersedes the older one, whose completion is then ignored.
    pub fn select(
        &mut self,
        row: usize,
        presenter: &mut impl Presenter,
    ) -> Result<ResolveRequest, PipelineError> {
        let item = self.items.get(row).ok_or(PipelineError::RowOutOfRange {
            row,
            len: self.items.len(),
        })?;
        self.issued += 1;
        let request = ResolveRequest {
            id: self.issued,
            shape: self.shape,
            row,
            title: item.title.clone(),
            url: item.url.clone(),
        };
        self.phase = Phase::Loading {
            request_id: request.id,
            row,
        };
        tracing::debug!(shape = %self.shape, row, title = %request.title, "resolve started");
        presenter.on_loading_started();
        Ok(request)
    }

    /// Whether `request` is the one this pipeline is waiting on. Ids restart
    /// with every pipeline, so the shape and row must agree as well.
    fn is_pending(&self, request: &ResolveRequest) -> bool {
        let loading = Phase::Loading {
            request_id: request.id,
            row: request.row,
        };
        self.phase == loading
            && request.shape == self.shape
            && self
                .items
                .get(request.row)
                .is_some_and(|item| item.url == request.url)
    }

    /// Deliver the outcome of `request`. Returns `false`, without notifying,
    /// when `request` is not the one currently loading.
    pub fn complete(
        &mut self,
        request: &ResolveRequest,
        outcome: Result<Vec<Detail>, String>,
        presenter: &mut impl Presenter,
    ) -> bool {
        if !self.is_pending(request) {
            tracing::debug!(request = request.id, "stale resolve result ignored");
            return false;
        }
        self.phase = Phase::Idle;
        match outcome {
            Ok(sections) => {
                tracing::debug!(row = request.row, sections = sections.len(), "resolve finished");
                presenter.on_resolved(sections, request.title.clone());
            }
            Err(message) => {
                tracing::debug!(row = request.row, error = %message, "resolve failed");
                presenter.on_failed(message);
            }
        }
        true
    }

    /// Select `row`, resolve it with `client` and deliver the result.
    pub async fn run<T: HttpTransport>(
        &mut self,
        row: usize,
        client: &ServiceClient<T>,
        presenter: &mut impl Presenter,
    ) -> Result<(), PipelineError> {
        let request = self.select(row, presenter)?;
        let outcome = resolve(client, request.shape, &request.url)
            .await
            .map_err(|err| err.to_string());
        self.complete(&request, outcome, presenter);
        Ok(())
    }
}

/// Fetch `url`, decode it as `shape` and project the record.
pub async fn resolve<T: HttpTransport>(
    client: &ServiceClient<T>,
    shape: Shape,
    url: &str,
) -> Result<Vec<Detail>, ResolveError> {
    let bytes = client.fetch(url).await?;
    Ok(decode_record(&bytes, shape)?.details())
}

/// [`resolve`] with the shape fixed at compile time.
pub async fn resolve_as<R: Resource, T: HttpTransport>(
    client: &ServiceClient<T>,
    url: &str,
) -> Result<Vec<Detail>, ResolveError> {
    resolve(client, R::SHAPE, url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Presenter for Recorder {
        fn on_loading_started(&mut self) {
            self.events.push("loading".into());
        }

        fn on_resolved(&mut self, sections: Vec<Detail>, title: String) {
            self.events.push(format!("resolved {title} ({})", sections.len()));
        }

        fn on_failed(&mut self, message: String) {
            self.events.push(format!("failed {message}"));
        }
    }

    fn pipeline() -> ListPipeline {
        ListPipeline::new(
            Shape::Ability,
            vec![
                ReferenceSummary {
                    title: "Overgrow".into(),
                    subtitle: "Slot #1".into(),
                    url: "https://pokeapi.co/api/v2/ability/65/".into(),
                },
                ReferenceSummary {
                    title: "Chlorophyll".into(),
                    subtitle: "Slot #3".into(),
                    url: "https://pokeapi.co/api/v2/ability/34/".into(),
                },
            ],
        )
    }

    #[test]
    fn test_select_enters_loading() {
        let mut pipeline = pipeline();
        let mut recorder = Recorder::default();

        let request = pipeline.select(1, &mut recorder).unwrap();

        assert!(pipeline.is_loading());
        assert_eq!(request.title, "Chlorophyll");
        assert_eq!(request.url, "https://pokeapi.co/api/v2/ability/34/");
        assert_eq!(recorder.events, vec!["loading"]);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut pipeline = pipeline();
        let mut recorder = Recorder::default();

        assert_eq!(
            pipeline.select(2, &mut recorder),
            Err(PipelineError::RowOutOfRange { row: 2, len: 2 })
        );
        assert_eq!(pipeline.phase(), Phase::Idle);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_complete_delivers_once() {
        let mut pipeline = pipeline();
        let mut recorder = Recorder::default();
        let request = pipeline.select(0, &mut recorder).unwrap();

        let sections = vec![Detail::single("ID", Some("65".into()))];
        assert!(pipeline.complete(&request, Ok(sections.clone()), &mut recorder));
        assert!(!pipeline.complete(&request, Ok(sections), &mut recorder));

        assert_eq!(pipeline.phase(), Phase::Idle);
        assert_eq!(recorder.events, vec!["loading", "resolved Overgrow (1)"]);
    }

    #[test]
    fn test_superseded_request_is_ignored() {
        let mut pipeline = pipeline();
        let mut recorder = Recorder::default();
        let first = pipeline.select(0, &mut recorder).unwrap();
        let second = pipeline.select(0, &mut recorder).unwrap();

        assert!(!pipeline.complete(&first, Err("Not Found".into()), &mut recorder));
        assert!(pipeline.is_loading());
        assert!(pipeline.complete(&second, Err("Not Found".into()), &mut recorder));
        assert_eq!(recorder.events, vec!["loading", "loading", "failed Not Found"]);
    }

    #[test]
    fn test_request_from_replaced_pipeline_is_ignored() {
        let mut recorder = Recorder::default();
        let late = pipeline().select(0, &mut recorder).unwrap();

        let mut types = ListPipeline::new(
            Shape::Type,
            vec![ReferenceSummary {
                title: "Grass".into(),
                subtitle: "Slot #1".into(),
                url: "https://pokeapi.co/api/v2/type/12/".into(),
            }],
        );
        let current = types.select(0, &mut recorder).unwrap();
        assert_eq!(late.id, current.id);

        assert!(!types.complete(&late, Ok(Vec::new()), &mut recorder));
        assert!(types.is_loading());

        let mut reloaded = pipeline();
        reloaded.select(1, &mut recorder).unwrap();
        assert!(!reloaded.complete(&late, Err("Not Found".into()), &mut recorder));
        assert_eq!(recorder.events, vec!["loading", "loading", "loading"]);
    }
}
