use crate::common::constants::FIELD_SEPARATOR;
use crate::errors::{DocLiteError, ErrorKind, DocLiteResult};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// A single step in a document path.
///
/// # Variants
/// - Name: descends into a document field
/// - Index: descends into a fixed array position
/// - Wildcard: descends into every array position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field inside a document.
    Name(String),
    /// A fixed position inside an array.
    Index(usize),
    /// Every position inside an array.
    Wildcard,
}

/// A parsed document path.
///
/// # Purpose
/// Paths address values inside nested documents and arrays. They are the
/// addressing scheme shared by queries, projections and update operators.
///
/// # Grammar
/// A path is a sequence of components separated by `.`. Each component is a
/// field name followed by zero or more bracket suffixes: `[]` selects every
/// element of an array, `[n]` selects the element at position `n`. Bracket
/// suffixes chain, so `matrix[0][2]` addresses a cell of a nested array.
///
/// # Examples
/// ```text
/// let path = Path::parse("address.city")?;
/// let path = Path::parse("items[0].price")?;
/// let path = Path::parse("tags[]")?;
/// ```
///
/// Parsing fails with `ErrorKind::MalformedPath` when a component is empty,
/// a bracket holds anything but digits, or brackets do not balance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: SmallVec<[PathSegment; 4]>,
}

impl Path {
    /// Parses the textual form of a path.
    ///
    /// # Arguments
    /// * `path` - The path text, e.g. `"items[0].price"`.
    ///
    /// # Returns
    /// The parsed `Path`, or an error with `ErrorKind::MalformedPath` when
    /// the text does not follow the path grammar.
    pub fn parse(path: &str) -> DocLiteResult<Path> {
        if path.is_empty() {
            log::error!("Failed to parse path: empty path");
            return Err(DocLiteError::new(
                "Empty path",
                ErrorKind::MalformedPath,
            ));
        }

        let mut segments = SmallVec::new();
        for component in path.split(FIELD_SEPARATOR) {
            parse_component(path, component, &mut segments)?;
        }

        Ok(Path { segments })
    }

    /// Returns the segments of this path in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Checks whether this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Checks whether any segment of this path is a wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, PathSegment::Wildcard))
    }
}

fn parse_component(
    path: &str,
    component: &str,
    segments: &mut SmallVec<[PathSegment; 4]>,
) -> DocLiteResult<()> {
    if component.is_empty() {
        log::error!("Failed to parse path '{}': empty component", path);
        return Err(DocLiteError::new(
            &format!("Empty component in path '{}'", path),
            ErrorKind::MalformedPath,
        ));
    }

    let (name, mut rest) = match component.find('[') {
        Some(pos) => component.split_at(pos),
        None => (component, ""),
    };

    if name.is_empty() {
        log::error!("Failed to parse path '{}': component without a name", path);
        return Err(DocLiteError::new(
            &format!("Component without a name in path '{}'", path),
            ErrorKind::MalformedPath,
        ));
    }

    if name.contains(']') {
        log::error!("Failed to parse path '{}': unbalanced bracket", path);
        return Err(DocLiteError::new(
            &format!("Unbalanced bracket in path '{}'", path),
            ErrorKind::MalformedPath,
        ));
    }

    segments.push(PathSegment::Name(name.to_string()));

    while !rest.is_empty() {
        let inner_start = match rest.strip_prefix('[') {
            Some(inner_start) => inner_start,
            None => {
                log::error!("Failed to parse path '{}': text after bracket", path);
                return Err(DocLiteError::new(
                    &format!("Unexpected text after bracket in path '{}'", path),
                    ErrorKind::MalformedPath,
                ));
            }
        };

        let close = match inner_start.find(']') {
            Some(close) => close,
            None => {
                log::error!("Failed to parse path '{}': unbalanced bracket", path);
                return Err(DocLiteError::new(
                    &format!("Unbalanced bracket in path '{}'", path),
                    ErrorKind::MalformedPath,
                ));
            }
        };

        let inner = &inner_start[..close];
        if inner.is_empty() {
            segments.push(PathSegment::Wildcard);
        } else if inner.bytes().all(|b| b.is_ascii_digit()) {
            let index = inner.parse::<usize>().map_err(|_| {
                log::error!("Failed to parse path '{}': index out of range", path);
                DocLiteError::new(
                    &format!("Index out of range in path '{}'", path),
                    ErrorKind::MalformedPath,
                )
            })?;
            segments.push(PathSegment::Index(index));
        } else {
            log::error!("Failed to parse path '{}': non-digit index", path);
            return Err(DocLiteError::new(
                &format!("Non-digit index in path '{}'", path),
                ErrorKind::MalformedPath,
            ));
        }

        rest = &inner_start[close + 1..];
    }

    Ok(())
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Name(name) => {
                    if position > 0 {
                        write!(f, "{}", FIELD_SEPARATOR)?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Wildcard => write!(f, "[]")?,
            }
        }
        Ok(())
    }
}
