// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media-query parsing and evaluation.
//!
//! Only the subset of media queries that breakpoint catalogs actually use is
//! understood: media types, the `only`/`not` prefixes, and the width, height
//! and orientation features. Queries are parsed once, when a breakpoint is
//! registered, and evaluated against a [`Viewport`] afterwards.

use core::fmt;

use cssparser::{
    BasicParseError, BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, Token,
};
use smallvec::SmallVec;

/// Pixels per `em`/`rem` when a query uses relative lengths.
const EM_PX: f32 = 16.0;

/// Media types a query can be restricted to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Matches every output device.
    #[default]
    All,
    /// Screens.
    Screen,
    /// Paged output.
    Print,
}

/// Viewport orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Height is greater than or equal to width.
    Portrait,
    /// Width is greater than height.
    Landscape,
}

/// The environment media queries are evaluated against.
///
/// # Example
///
/// ```rust
/// use understory_breakpoint::{MediaQueryList, Orientation, Viewport};
///
/// let query = MediaQueryList::parse("screen and (min-width: 600px)").unwrap();
/// let tablet = Viewport::new(800.0, 1024.0);
///
/// assert_eq!(tablet.orientation(), Orientation::Portrait);
/// assert!(query.matches(&tablet));
/// assert!(!query.matches(&Viewport::new(320.0, 640.0)));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Viewport width in CSS pixels.
    pub width: f32,
    /// Viewport height in CSS pixels.
    pub height: f32,
    /// Output device type.
    pub media_type: MediaType,
}

impl Viewport {
    /// A screen viewport of the given size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            media_type: MediaType::Screen,
        }
    }

    /// Returns this viewport with a different media type.
    #[must_use]
    pub const fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    /// Portrait when the height is at least the width.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.height >= self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// A single parenthesized media feature test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MediaFeature {
    /// `(width: N)`
    Width(f32),
    /// `(min-width: N)`
    MinWidth(f32),
    /// `(max-width: N)`
    MaxWidth(f32),
    /// `(height: N)`
    Height(f32),
    /// `(min-height: N)`
    MinHeight(f32),
    /// `(max-height: N)`
    MaxHeight(f32),
    /// `(orientation: portrait | landscape)`
    Orientation(Orientation),
}

impl MediaFeature {
    fn matches(self, viewport: &Viewport) -> bool {
        match self {
            Self::Width(px) => viewport.width == px,
            Self::MinWidth(px) => viewport.width >= px,
            Self::MaxWidth(px) => viewport.width <= px,
            Self::Height(px) => viewport.height == px,
            Self::MinHeight(px) => viewport.height >= px,
            Self::MaxHeight(px) => viewport.height <= px,
            Self::Orientation(orientation) => viewport.orientation() == orientation,
        }
    }
}

/// The region of viewport space a query accepts.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Extent {
    min_width: f32,
    max_width: f32,
    min_height: f32,
    max_height: f32,
    orientation: Option<Orientation>,
}

impl Extent {
    const UNBOUNDED: Self = Self {
        min_width: 0.0,
        max_width: f32::INFINITY,
        min_height: 0.0,
        max_height: f32::INFINITY,
        orientation: None,
    };

    fn contains(&self, other: &Self) -> bool {
        let orientation_ok = match (self.orientation, other.orientation) {
            (None, _) => true,
            (Some(a), Some(b)) => a == b,
            (Some(_), None) => false,
        };
        orientation_ok
            && self.min_width <= other.min_width
            && self.max_width >= other.max_width
            && self.min_height <= other.min_height
            && self.max_height >= other.max_height
    }
}

/// One query of a comma-separated list: `[not|only] [type] [and (feature)]*`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaQuery {
    negated: bool,
    media_type: MediaType,
    features: SmallVec<[MediaFeature; 2]>,
}

impl MediaQuery {
    /// Returns `true` if the query was prefixed with `not`.
    #[must_use]
    #[inline]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The media type the query is restricted to.
    #[must_use]
    #[inline]
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// The feature tests, in source order.
    #[must_use]
    #[inline]
    pub fn features(&self) -> &[MediaFeature] {
        &self.features
    }

    /// Evaluates the query against a viewport.
    #[must_use]
    pub fn matches(&self, viewport: &Viewport) -> bool {
        let type_ok = match self.media_type {
            MediaType::All => true,
            media_type => media_type == viewport.media_type,
        };
        let matched = type_ok && self.features.iter().all(|f| f.matches(viewport));
        matched != self.negated
    }

    /// Returns `true` if every viewport accepted by `other` is also accepted
    /// by `self`.
    ///
    /// Negated queries never cover, nor are covered by, anything.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        if self.negated || other.negated {
            return false;
        }
        let type_ok = self.media_type == MediaType::All || self.media_type == other.media_type;
        type_ok && self.extent().contains(&other.extent())
    }

    fn extent(&self) -> Extent {
        let mut extent = Extent::UNBOUNDED;
        for feature in &self.features {
            match *feature {
                MediaFeature::Width(px) => {
                    extent.min_width = extent.min_width.max(px);
                    extent.max_width = extent.max_width.min(px);
                }
                MediaFeature::MinWidth(px) => extent.min_width = extent.min_width.max(px),
                MediaFeature::MaxWidth(px) => extent.max_width = extent.max_width.min(px),
                MediaFeature::Height(px) => {
                    extent.min_height = extent.min_height.max(px);
                    extent.max_height = extent.max_height.min(px);
                }
                MediaFeature::MinHeight(px) => extent.min_height = extent.min_height.max(px),
                MediaFeature::MaxHeight(px) => extent.max_height = extent.max_height.min(px),
                MediaFeature::Orientation(orientation) => extent.orientation = Some(orientation),
            }
        }
        extent
    }
}

/// A parsed, comma-separated media query list.
///
/// The list matches when any of its queries matches.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaQueryList {
    queries: SmallVec<[MediaQuery; 1]>,
}

impl MediaQueryList {
    /// Parses a media query list such as
    /// `screen and (min-width: 600px) and (max-width: 959.98px)`.
    ///
    /// # Errors
    ///
    /// Returns [`MediaQueryError`] if the source is empty, uses an
    /// unsupported feature, or is otherwise malformed.
    pub fn parse(source: &str) -> Result<Self, MediaQueryError> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        parser
            .parse_comma_separated(parse_query)
            .map(|queries| Self {
                queries: queries.into_iter().collect(),
            })
            .map_err(|err| MediaQueryError::from_parse_error(source, &err))
    }

    /// The individual queries.
    #[must_use]
    #[inline]
    pub fn queries(&self) -> &[MediaQuery] {
        &self.queries
    }

    /// Evaluates the list against a viewport.
    #[must_use]
    pub fn matches(&self, viewport: &Viewport) -> bool {
        self.queries.iter().any(|q| q.matches(viewport))
    }

    /// Returns `true` if every query in `other` is covered by some query in
    /// `self`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        other
            .queries
            .iter()
            .all(|theirs| self.queries.iter().any(|ours| ours.covers(theirs)))
    }
}

/// Error returned when a media query cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid media query `{query}` at column {column}: {reason}")]
pub struct MediaQueryError {
    query: String,
    column: u32,
    reason: String,
}

impl MediaQueryError {
    fn from_parse_error(source: &str, err: &ParseError<'_, QueryErrorKind>) -> Self {
        let reason = match &err.kind {
            ParseErrorKind::Custom(kind) => kind.to_string(),
            ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
                String::from("unexpected end of input")
            }
            ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
                format!("unexpected token {token:?}")
            }
            ParseErrorKind::Basic(other) => format!("{other:?}"),
        };
        Self {
            query: source.to_owned(),
            column: err.location.column,
            reason,
        }
    }

    /// The rejected query source.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// One-based column of the offending token.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum QueryErrorKind {
    Empty,
    UnknownFeature,
    UnknownOrientation,
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "query has neither a media type nor a feature",
            Self::UnknownFeature => "unsupported media feature",
            Self::UnknownOrientation => "orientation must be `portrait` or `landscape`",
        })
    }
}

fn parse_query<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<MediaQuery, ParseError<'i, QueryErrorKind>> {
    let location = input.current_source_location();
    let mut query = MediaQuery::default();

    if input
        .try_parse(|input| input.expect_ident_matching("not"))
        .is_ok()
    {
        query.negated = true;
    } else {
        // `only` exists to hide queries from legacy agents and has no meaning here.
        let _ = input.try_parse(|input| input.expect_ident_matching("only"));
    }

    let has_type = match input.try_parse(parse_media_type) {
        Ok(media_type) => {
            query.media_type = media_type;
            true
        }
        Err(_) => false,
    };

    let mut expect_and = has_type;
    while !input.is_exhausted() {
        if expect_and {
            input.expect_ident_matching("and")?;
        }
        query.features.push(parse_feature(input)?);
        expect_and = true;
    }

    if !has_type && query.features.is_empty() {
        return Err(location.new_custom_error(QueryErrorKind::Empty));
    }
    Ok(query)
}

fn parse_media_type<'i>(input: &mut Parser<'i, '_>) -> Result<MediaType, BasicParseError<'i>> {
    let location = input.current_source_location();
    let ident = input.expect_ident()?;
    if ident.eq_ignore_ascii_case("all") {
        Ok(MediaType::All)
    } else if ident.eq_ignore_ascii_case("screen") {
        Ok(MediaType::Screen)
    } else if ident.eq_ignore_ascii_case("print") {
        Ok(MediaType::Print)
    } else {
        Err(location.new_basic_unexpected_token_error(Token::Ident(ident.clone())))
    }
}

fn parse_feature<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<MediaFeature, ParseError<'i, QueryErrorKind>> {
    input.expect_parenthesis_block()?;
    input.parse_nested_block(|input| -> Result<_, ParseError<'i, QueryErrorKind>> {
        let location = input.current_source_location();
        let name = input.expect_ident()?.to_ascii_lowercase();
        input.expect_colon()?;

        if name == "orientation" {
            let value = input.expect_ident()?;
            return if value.eq_ignore_ascii_case("portrait") {
                Ok(MediaFeature::Orientation(Orientation::Portrait))
            } else if value.eq_ignore_ascii_case("landscape") {
                Ok(MediaFeature::Orientation(Orientation::Landscape))
            } else {
                Err(location.new_custom_error(QueryErrorKind::UnknownOrientation))
            };
        }

        let px = parse_length(input)?;
        match name.as_str() {
            "width" => Ok(MediaFeature::Width(px)),
            "min-width" => Ok(MediaFeature::MinWidth(px)),
            "max-width" => Ok(MediaFeature::MaxWidth(px)),
            "height" => Ok(MediaFeature::Height(px)),
            "min-height" => Ok(MediaFeature::MinHeight(px)),
            "max-height" => Ok(MediaFeature::MaxHeight(px)),
            _ => Err(location.new_custom_error(QueryErrorKind::UnknownFeature)),
        }
    })
}

fn parse_length<'i>(input: &mut Parser<'i, '_>) -> Result<f32, ParseError<'i, QueryErrorKind>> {
    let location = input.current_source_location();
    match *input.next()? {
        Token::Dimension {
            value, ref unit, ..
        } if unit.eq_ignore_ascii_case("px") => Ok(value),
        Token::Dimension {
            value, ref unit, ..
        } if unit.eq_ignore_ascii_case("em") || unit.eq_ignore_ascii_case("rem") => {
            Ok(value * EM_PX)
        }
        Token::Number { value, .. } if value == 0.0 => Ok(0.0),
        ref token => Err(location.new_unexpected_token_error(token.clone())),
    }
}
