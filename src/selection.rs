use crate::error::{Result, SplitError};
use std::collections::HashSet;

/// An ordered choice of chapters, as zero-based indices into the resolved
/// chapter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection(Vec<usize>);

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChapterRef {
    Number(usize),
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ChapterSpan {
    start: ChapterRef,
    end: Option<ChapterRef>,
}

impl Selection {
    pub fn new(indices: Vec<usize>) -> Self {
        Selection(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Parse 1-based chapter numbers such as `"1-3,7,10-8,end"` against a
    /// list of `chapter_count` chapters. Spans may run backwards.
    pub fn parse(s: &str, chapter_count: usize) -> Result<Self> {
        let mut indices = Vec::new();
        for part in s.split(',') {
            let span = ChapterSpan::parse(part)?;
            indices.extend(span.expand(chapter_count)?);
        }
        let selection = Selection(indices);
        selection.check(chapter_count)?;
        Ok(selection)
    }

    /// Every index must be unique and below `chapter_count`.
    pub fn check(&self, chapter_count: usize) -> Result<()> {
        let mut seen = HashSet::new();
        for &index in &self.0 {
            if index >= chapter_count {
                return Err(SplitError::InvalidSelection(format!(
                    "chapter index {} is out of range (document has {} chapter(s))",
                    index, chapter_count
                )));
            }
            if !seen.insert(index) {
                return Err(SplitError::InvalidSelection(format!(
                    "chapter index {} selected more than once",
                    index
                )));
            }
        }
        Ok(())
    }
}

impl ChapterSpan {
    fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SplitError::InvalidSelection("empty chapter range".to_string()));
        }

        match s.split_once('-') {
            Some(("", _)) => Err(SplitError::InvalidSelection(format!(
                "invalid chapter range: {}",
                s
            ))),
            Some((start, end)) => Ok(ChapterSpan {
                start: parse_chapter_ref(start)?,
                end: Some(parse_chapter_ref(end)?),
            }),
            None => Ok(ChapterSpan {
                start: parse_chapter_ref(s)?,
                end: None,
            }),
        }
    }

    /// Expand into zero-based indices.
    fn expand(&self, chapter_count: usize) -> Result<Vec<usize>> {
        let resolve = |r: &ChapterRef| match r {
            ChapterRef::Number(n) => *n,
            ChapterRef::End => chapter_count,
        };

        let start = resolve(&self.start);
        let end = self.end.as_ref().map(resolve).unwrap_or(start);

        for n in [start, end] {
            if n == 0 || n > chapter_count {
                return Err(SplitError::InvalidSelection(format!(
                    "chapter {} is out of range (1-{})",
                    n, chapter_count
                )));
            }
        }

        let indices = if start <= end {
            (start - 1..end).collect()
        } else {
            (end - 1..start).rev().collect()
        };
        Ok(indices)
    }
}

fn parse_chapter_ref(s: &str) -> Result<ChapterRef> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("end") {
        Ok(ChapterRef::End)
    } else {
        s.parse::<usize>()
            .map(ChapterRef::Number)
            .map_err(|_| SplitError::InvalidSelection(format!("invalid chapter number: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chapter() {
        assert_eq!(Selection::parse("3", 5).unwrap().indices(), &[2]);
    }

    #[test]
    fn test_span_and_list() {
        let sel = Selection::parse("1-3, 5", 5).unwrap();
        assert_eq!(sel.indices(), &[0, 1, 2, 4]);
    }

    #[test]
    fn test_reverse_span_orders_output() {
        let sel = Selection::parse("4-2", 5).unwrap();
        assert_eq!(sel.indices(), &[3, 2, 1]);
    }

    #[test]
    fn test_end_keyword() {
        assert_eq!(Selection::parse("3-end", 5).unwrap().indices(), &[2, 3, 4]);
        assert_eq!(Selection::parse("end", 5).unwrap().indices(), &[4]);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Selection::parse("0", 5).is_err());
        assert!(Selection::parse("6", 5).is_err());
        assert!(Selection::parse("2-9", 5).is_err());
        assert!(Selection::parse("-2", 5).is_err());
        assert!(Selection::parse("two", 5).is_err());
        assert!(Selection::parse("", 5).is_err());
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = Selection::parse("1-3,2", 5).unwrap_err();
        assert!(matches!(err, SplitError::InvalidSelection(_)));
    }

    #[test]
    fn test_check_explicit_indices() {
        assert!(Selection::new(vec![2, 0]).check(3).is_ok());
        assert!(Selection::new(vec![3]).check(3).is_err());
        assert!(Selection::new(vec![1, 1]).check(3).is_err());
        assert!(Selection::new(vec![]).check(0).is_ok());
    }
}
