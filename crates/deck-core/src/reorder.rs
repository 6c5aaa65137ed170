//! Validated, best-effort application of a slide order.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, info_span, warn};

use deck_model::{
    ApplicationError, HostError, HostOperation, Permutation, ReorderOptions, ReorderReport,
    ReorderStage, StepOutcome, ValidationError,
};

use crate::host::{AutomationHost, DocumentId, HostConnector, TransferBuffer};
use crate::session::Session;

/// Builds a new document at `output` holding the slides of `input` in `order`.
///
/// Session, document and structural failures abort the run with an
/// [`ApplicationError`]; the session is torn down on every path. A slide whose
/// copy or paste fails is recorded as skipped in the report and the run
/// carries on with the next one.
pub fn apply<C: HostConnector>(
    connector: &C,
    input: &Path,
    output: &Path,
    order: &Permutation,
    options: &ReorderOptions,
) -> Result<ReorderReport, ApplicationError> {
    let span = info_span!(
        "reorder",
        input = %input.display(),
        output = %output.display(),
        order_len = order.len()
    );
    let _guard = span.enter();
    let mut run = ReorderRun::new(options.settle_delay());
    let result = run.execute(connector, input, output, order);
    match &result {
        Ok(report) => info!(
            placed = report.placed_count(),
            skipped = report.skipped_count(),
            output = %report.output.display(),
            "reorder complete"
        ),
        Err(err) => {
            run.transition(ReorderStage::Aborted);
            error!(stage = %err.stage(), error = %err, "reorder aborted");
        }
    }
    result
}

struct ReorderRun {
    stage: ReorderStage,
    settle_delay: Duration,
}

impl ReorderRun {
    fn new(settle_delay: Duration) -> Self {
        Self {
            stage: ReorderStage::Uninitialized,
            settle_delay,
        }
    }

    /// Terminal stages are final; later transitions are ignored.
    fn transition(&mut self, next: ReorderStage) {
        if self.stage.is_terminal() {
            return;
        }
        debug!(from = %self.stage, to = %next, "stage transition");
        self.stage = next;
    }

    fn execute<C: HostConnector>(
        &mut self,
        connector: &C,
        input: &Path,
        output: &Path,
        order: &Permutation,
    ) -> Result<ReorderReport, ApplicationError> {
        let mut session = Session::<C::Host>::open(connector)
            .map_err(|source| ApplicationError::SessionInit { source })?;
        self.transition(ReorderStage::SessionOpen);

        let document_open = |source| ApplicationError::DocumentOpen {
            path: input.to_path_buf(),
            source,
        };
        let source_doc = session.open_document(input).map_err(document_open)?;
        let slide_count = session
            .host()
            .slide_count(source_doc)
            .map_err(document_open)?;
        self.transition(ReorderStage::DocumentOpen);
        info!(slide_count, "opened presentation");

        check_structure(input, order, slide_count)?;

        let target_doc = session
            .create_document()
            .map_err(|source| ApplicationError::TargetCreate { source })?;
        self.transition(ReorderStage::Reordering);

        let mut buffer = session.host().transfer_buffer();
        let mut steps = Vec::with_capacity(order.len());
        for (offset, source_index) in order.iter().enumerate() {
            let position = offset + 1;
            info!(position, slide_index = source_index, "copying slide");
            let step = match self.transfer_slide(
                session.host_mut(),
                source_doc,
                target_doc,
                source_index,
                &mut buffer,
            ) {
                Ok(()) => StepOutcome::placed(position, source_index),
                Err(err) => {
                    error!(
                        position,
                        slide_index = source_index,
                        error = %err,
                        "failed to copy slide, skipping"
                    );
                    StepOutcome::skipped(position, source_index, err.to_string())
                }
            };
            steps.push(step);
        }

        let output_path = absolute_output(output)?;
        info!(path = %output_path.display(), "saving reordered presentation");
        session
            .host_mut()
            .save_as(target_doc, &output_path)
            .map_err(|source| ApplicationError::Save {
                path: output_path.clone(),
                source,
            })?;
        session
            .close()
            .map_err(|source| ApplicationError::Teardown { source })?;
        self.transition(ReorderStage::Saved);

        Ok(ReorderReport {
            source: input.to_path_buf(),
            output: output_path,
            slide_count,
            steps,
        })
    }

    /// Moves one slide through the transfer buffer into the target document.
    fn transfer_slide<H: AutomationHost>(
        &self,
        host: &mut H,
        source_doc: DocumentId,
        target_doc: DocumentId,
        source_index: usize,
        buffer: &mut H::Buffer,
    ) -> Result<(), HostError> {
        // Cleared before every copy; a failed clear is not fatal.
        if let Err(err) = buffer.clear() {
            warn!(slide_index = source_index, error = %err, "failed to clear transfer buffer");
        }
        host.copy_slide(source_doc, source_index, buffer)?;
        thread::sleep(self.settle_delay);
        host.paste_slide(target_doc, buffer)?;
        thread::sleep(self.settle_delay);
        Ok(())
    }
}

/// Rejects empty documents and orders that are not a permutation of the slides.
fn check_structure(
    input: &Path,
    order: &Permutation,
    slide_count: usize,
) -> Result<(), ApplicationError> {
    if slide_count == 0 {
        return Err(ApplicationError::EmptyDocument {
            path: input.to_path_buf(),
        });
    }
    if order.is_empty() {
        return Err(ApplicationError::EmptyOrder);
    }
    order.validate(slide_count).map_err(|err| match err {
        ValidationError::OrderEmpty => ApplicationError::EmptyOrder,
        ValidationError::CountMismatch {
            order_len,
            slide_count,
        } => ApplicationError::CountMismatch {
            order_len,
            slide_count,
        },
        _ => ApplicationError::InvalidOrder {
            order: order.to_string(),
            slide_count,
        },
    })
}

fn absolute_output(output: &Path) -> Result<PathBuf, ApplicationError> {
    std::path::absolute(output).map_err(|err| ApplicationError::Save {
        path: output.to_path_buf(),
        source: HostError::new(HostOperation::SaveAs, err.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_checks_run_in_order() {
        let input = Path::new("deck.json");
        let empty = Permutation::from(Vec::new());
        assert!(matches!(
            check_structure(input, &empty, 0),
            Err(ApplicationError::EmptyDocument { .. })
        ));
        assert!(matches!(
            check_structure(input, &empty, 3),
            Err(ApplicationError::EmptyOrder)
        ));
        assert!(matches!(
            check_structure(input, &Permutation::from(vec![1, 2]), 3),
            Err(ApplicationError::CountMismatch {
                order_len: 2,
                slide_count: 3
            })
        ));
        assert!(matches!(
            check_structure(input, &Permutation::from(vec![1, 2, 2]), 3),
            Err(ApplicationError::InvalidOrder { slide_count: 3, .. })
        ));
        assert!(check_structure(input, &Permutation::identity(3), 3).is_ok());
    }

    #[test]
    fn relative_output_becomes_absolute() {
        let path = absolute_output(Path::new("out.json")).expect("absolute path");
        assert!(path.is_absolute());
        assert!(path.ends_with("out.json"));
    }

    #[test]
    fn terminal_stage_is_final() {
        let mut run = ReorderRun::new(Duration::from_millis(1));
        run.transition(ReorderStage::Reordering);
        assert_eq!(run.stage, ReorderStage::Reordering);
        run.transition(ReorderStage::Saved);
        run.transition(ReorderStage::Aborted);
        assert_eq!(run.stage, ReorderStage::Saved);
    }
}
