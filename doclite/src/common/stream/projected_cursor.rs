use crate::collection::Document;
use crate::common::constants::DOC_ID;
use crate::common::stream::document_cursor::DocumentCursor;
use crate::common::{Path, PathSegment, Value};
use crate::errors::{DocLiteError, DocLiteResult, ErrorKind};
use itertools::Itertools;

/// Cursor adapter that reshapes every yielded document according to a
/// projection specification.
///
/// The specification is a document mapping paths to `1` (include). The id
/// field is carried over by default; `{"_id": 0}` suppresses it. A `0`
/// against any other path is ignored.
pub struct ProjectedDocumentCursor<'a> {
    cursor: &'a mut DocumentCursor,
    plan: ProjectionPlan,
}

impl<'a> ProjectedDocumentCursor<'a> {
    pub(crate) fn new(
        cursor: &'a mut DocumentCursor,
        projection: Document,
    ) -> DocLiteResult<Self> {
        let plan = ProjectionPlan::compile(&projection)?;
        Ok(ProjectedDocumentCursor { cursor, plan })
    }

    /// Resets the projected cursor by resetting the underlying cursor.
    pub fn reset(&mut self) {
        self.cursor.reset();
    }

    pub fn size(&mut self) -> usize {
        self.cursor.size()
    }
}

impl<'a> Iterator for ProjectedDocumentCursor<'a> {
    type Item = DocLiteResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor
            .next()
            .map(|result| result.and_then(|document| self.plan.apply(&document)))
    }
}

/// Pre-parsed projection, compiled once per cursor.
///
/// Each included path is paired with its write target: the path itself for
/// plain paths, or the document-key spine (name segments only) when the
/// path descends through array indices, since the output document has no
/// arrays to index into.
struct ProjectionPlan {
    included: Vec<(Path, Path)>,
    include_id: bool,
    identity: bool,
}

impl ProjectionPlan {
    fn compile(projection: &Document) -> DocLiteResult<ProjectionPlan> {
        if projection.size() == 0 {
            return Ok(ProjectionPlan {
                included: Vec::new(),
                include_id: true,
                identity: true,
            });
        }

        let mut included = Vec::new();
        let mut include_id = true;

        for (field, value) in projection.iter() {
            let flag = projection_flag(&field, &value)?;
            if flag == 0 {
                if field == DOC_ID {
                    include_id = false;
                }
                // excluding any other path is not supported, ignore
                continue;
            }

            let path = Path::parse(&field)?;
            if path.has_wildcard() {
                log::error!("Wildcard path '{}' cannot appear in a projection", field);
                return Err(DocLiteError::new(
                    &format!("Wildcard path '{}' cannot appear in a projection", field),
                    ErrorKind::InvalidWritePath,
                ));
            }
            let target = key_spine(&path)?;
            included.push((path, target));
        }

        Ok(ProjectionPlan {
            included,
            include_id,
            identity: false,
        })
    }

    fn apply(&self, document: &Document) -> DocLiteResult<Document> {
        if self.identity {
            return Ok(document.clone());
        }

        let mut projected = Document::new();
        if self.include_id {
            if let Some(id) = document.id() {
                projected.put(DOC_ID, id.clone())?;
            }
        }

        for (source, target) in &self.included {
            if let Some(value) = document.resolve_first(source) {
                projected.put_path(target, value)?;
            }
        }
        Ok(projected)
    }
}

/// Drops index segments from a path, keeping only the document-key spine.
fn key_spine(path: &Path) -> DocLiteResult<Path> {
    let spine = path
        .segments()
        .iter()
        .filter_map(|segment| match segment {
            PathSegment::Name(name) => Some(name.as_str()),
            _ => None,
        })
        .join(".");
    Path::parse(&spine)
}

fn projection_flag(field: &str, value: &Value) -> DocLiteResult<i128> {
    match value.as_integer() {
        Some(flag) if flag == 0 || flag == 1 => Ok(flag),
        _ => {
            log::error!(
                "Invalid projection value for '{}': expected 0 or 1, found {:?}",
                field,
                value
            );
            Err(DocLiteError::new(
                &format!(
                    "Invalid projection value for '{}': expected 0 or 1",
                    field
                ),
                ErrorKind::ValidationError,
            ))
        }
    }
}
