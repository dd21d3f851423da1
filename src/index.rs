use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use serde::{Deserialize, Serialize};

use crate::timespan::TimeSpan;
use crate::tree_item::{NodeKind, TreeItem};

const VIDEO_TITLE: Style = Style::new().fg(Color::LightMagenta);
const CHAPTER_TITLE: Style = Style::new().fg(Color::LightBlue);
const SEGMENT_TITLE: Style = Style::new().fg(Color::Green);
const TIME_BADGE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION: Style = Style::new().fg(Color::Gray);

const VIDEO_ICON: &str = "\u{1f4f9}"; // Video camera
const CHAPTER_ICON: &str = "\u{1f4da}"; // Books
const SEGMENT_ICON: &str = "\u{1f3ac}"; // Clapper board

/// Smallest meaningful unit of the analysed video: a scene, an exchange, a
/// visual event or a slide. Only segments carry an exact time range of their
/// own; every parent covers whatever its segments cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentNode {
    pub title: String,
    pub description: String,
    pub time_span: TimeSpan,
}

impl SegmentNode {
    /// Stable identifier derived from the covered time range.
    #[must_use]
    pub fn id(&self) -> String {
        id("Segment", self.time_span)
    }

    #[must_use]
    pub fn tree_item(&self) -> TreeItem<'static, String> {
        TreeItem::new_leaf(
            self.id(),
            label(
                SEGMENT_ICON,
                SEGMENT_TITLE,
                &self.title,
                self.time_span,
                &self.description,
            ),
        )
    }
}

/// Major division of the video, for example the introduction or a topic change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterNode {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub children: Vec<SegmentNode>,
}

impl ChapterNode {
    /// Hull over the children, [`TimeSpan::EMPTY`] while there are none.
    #[must_use]
    pub fn time_span(&self) -> TimeSpan {
        TimeSpan::enclosing(self.children.iter().map(|child| child.time_span))
            .unwrap_or(TimeSpan::EMPTY)
    }

    /// Stable identifier derived from the covered time range.
    #[must_use]
    pub fn id(&self) -> String {
        id("Chapter", self.time_span())
    }

    /// # Errors
    ///
    /// Errors when two children cover exactly the same time range and therefore
    /// end up with the same identifier.
    pub fn tree_item(&self) -> std::io::Result<TreeItem<'static, String>> {
        let children = self.children.iter().map(SegmentNode::tree_item).collect();
        TreeItem::new(
            self.id(),
            label(
                CHAPTER_ICON,
                CHAPTER_TITLE,
                &self.title,
                self.time_span(),
                &self.summary,
            ),
            children,
        )
    }
}

/// One entry directly below the video root.
///
/// The indexing step places a segment directly below the root when it is
/// independent enough to not warrant a chapter around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node_type")]
pub enum IndexNode {
    Chapter(ChapterNode),
    Segment(SegmentNode),
}

impl IndexNode {
    #[must_use]
    pub fn time_span(&self) -> TimeSpan {
        match self {
            Self::Chapter(chapter) => chapter.time_span(),
            Self::Segment(segment) => segment.time_span,
        }
    }

    /// # Errors
    ///
    /// Errors when sibling segments of a chapter share a time range.
    pub fn tree_item(&self) -> std::io::Result<TreeItem<'static, String>> {
        match self {
            Self::Chapter(chapter) => chapter.tree_item(),
            Self::Segment(segment) => Ok(segment.tree_item()),
        }
    }
}

/// Root of an analysed video: the content tree an external indexing step
/// produced from the raw footage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoIndex {
    pub video_title: String,
    pub overview: String,
    #[serde(default)]
    pub children: Vec<IndexNode>,
}

impl VideoIndex {
    /// Hull over the children, [`TimeSpan::EMPTY`] while there are none.
    #[must_use]
    pub fn time_span(&self) -> TimeSpan {
        TimeSpan::enclosing(self.children.iter().map(IndexNode::time_span))
            .unwrap_or(TimeSpan::EMPTY)
    }

    /// Stable identifier derived from the covered time range.
    #[must_use]
    pub fn id(&self) -> String {
        id("Video", self.time_span())
    }

    /// The whole index as a single top level [`TreeItem`].
    ///
    /// The root is a [`NodeKind::Video`] item, so
    /// [`TreeState::collapse_initial`](crate::TreeState::collapse_initial) keeps
    /// the chapter titles below it visible while the chapters themselves start
    /// out collapsed.
    ///
    /// # Errors
    ///
    /// Errors when siblings cover exactly the same time range and therefore end
    /// up with the same identifier.
    pub fn tree_item(&self) -> std::io::Result<TreeItem<'static, String>> {
        let children = self
            .children
            .iter()
            .map(IndexNode::tree_item)
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(TreeItem::new(
            self.id(),
            label(
                VIDEO_ICON,
                VIDEO_TITLE,
                &self.video_title,
                self.time_span(),
                &self.overview,
            ),
            children,
        )?
        .kind(NodeKind::Video))
    }
}

fn id(prefix: &str, span: TimeSpan) -> String {
    format!(
        "{prefix}_{:02}{:02}_{:02}{:02}",
        span.start().minutes(),
        span.start().seconds(),
        span.end().minutes(),
        span.end().seconds()
    )
}

/// Two line item: icon, title and time badge on top, the description below.
fn label(
    icon: &str,
    title_style: Style,
    title: &str,
    span: TimeSpan,
    description: &str,
) -> Text<'static> {
    let header = Line::from(vec![
        Span::raw(format!("{icon} ")),
        Span::styled(title.to_owned(), title_style),
        Span::styled(format!("  {span}"), TIME_BADGE),
    ]);
    let description = Line::from(Span::styled(description.to_owned(), DESCRIPTION));
    Text::from(vec![header, description])
}

#[cfg(test)]
#[track_caller]
fn test_span(start: &str, end: &str) -> TimeSpan {
    TimeSpan::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
}

#[cfg(test)]
fn test_segment(title: &str, start: &str, end: &str) -> SegmentNode {
    SegmentNode {
        title: title.to_owned(),
        description: format!("Description of {title}"),
        time_span: test_span(start, end),
    }
}

#[cfg(test)]
pub(crate) fn example_index() -> VideoIndex {
    VideoIndex {
        video_title: "Rust in Production".to_owned(),
        overview: "Conference talk about shipping Rust services".to_owned(),
        children: vec![
            IndexNode::Chapter(ChapterNode {
                title: "Introduction".to_owned(),
                summary: "Speaker and agenda".to_owned(),
                children: vec![
                    test_segment("Opening hook", "00:00", "00:45"),
                    test_segment("Agenda", "00:45", "01:30"),
                ],
            }),
            IndexNode::Segment(test_segment("Q&A", "25:00", "29:30")),
        ],
    }
}

#[test]
fn chapter_span_is_the_hull_of_its_segments() {
    let index = example_index();
    let IndexNode::Chapter(chapter) = &index.children[0] else {
        panic!("first child should be a chapter");
    };
    assert_eq!(chapter.time_span(), test_span("00:00", "01:30"));
}

#[test]
fn childless_chapter_falls_back_to_the_empty_span() {
    let chapter = ChapterNode {
        title: "Outlook".to_owned(),
        summary: "Not yet segmented".to_owned(),
        children: Vec::new(),
    };
    assert_eq!(chapter.time_span(), TimeSpan::EMPTY);
}

#[test]
fn ids_strip_the_colons_from_the_endpoints() {
    let index = example_index();
    assert_eq!(index.id(), "Video_0000_2930");
    let IndexNode::Chapter(chapter) = &index.children[0] else {
        panic!("first child should be a chapter");
    };
    assert_eq!(chapter.id(), "Chapter_0000_0130");
    assert_eq!(chapter.children[1].id(), "Segment_0045_0130");
}

#[test]
fn items_are_two_lines_tall() {
    let item = example_index().tree_item().unwrap();
    assert_eq!(item.height(), 2);
    assert_eq!(item.children()[0].height(), 2);
}

#[test]
fn tree_item_mirrors_the_index_structure() {
    let item = example_index().tree_item().unwrap();
    assert_eq!(item.children().len(), 2);
    assert_eq!(item.children()[0].children().len(), 2);
    assert_eq!(item.children()[1].children().len(), 0);
}

#[test]
fn initial_collapse_folds_the_chapters_but_not_the_video_root() {
    let items = vec![example_index().tree_item().unwrap()];
    let mut state = crate::TreeState::default();
    state.collapse_initial(&items);
    assert_eq!(
        state.get_all_collapsed(),
        [vec!["Video_0000_2930".to_owned(), "Chapter_0000_0130".to_owned()]]
    );
}

#[test]
fn duplicate_sibling_spans_error() {
    let chapter = ChapterNode {
        title: "Broken".to_owned(),
        summary: "Two segments covering the same range".to_owned(),
        children: vec![
            test_segment("First", "00:00", "01:00"),
            test_segment("Second", "00:00", "01:00"),
        ],
    };
    let error = chapter.tree_item().unwrap_err();
    assert_eq!(error.kind(), std::io::ErrorKind::AlreadyExists);
}
