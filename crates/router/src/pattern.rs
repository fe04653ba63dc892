//! Path template compilation and matching.
//!
//! Matching itself is delegated to [`matchit`]; this module only adapts
//! templates to its syntax and applies the process-wide [`MatchOptions`].
//!
//! Accepted template syntax:
//! - literal segments: `/users/all`
//! - named segments: `/users/:id` or `/users/{id}`, a name may follow a
//!   literal prefix (`/api/v:major`)
//! - optional groups: `/api(/v:major)` matches both `/api` and `/api/v2`,
//!   groups may nest
//! - a trailing wildcard: `/files/*`, captured under [`WILDCARD_PARAM`].
//!   It also matches nothing at all, so `/files/` captures an empty string
//!
//! Matching is anchored: a template matches the whole path, never a prefix.
//! At most one parameter fits in a path segment, `/:from-:to` is rejected.

use crate::PathParams;
use crate::error::RouteError;
use percent_encoding::percent_decode_str;
use std::collections::HashSet;
use std::fmt;
use std::iter;
use std::str::Chars;

/// Name under which a trailing `*` wildcard is captured.
pub const WILDCARD_PARAM: &str = "wildcard";

const WILDCARD_ROUTE: &str = "{*wildcard}";

/// Options applied when compiling and matching a path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Compare literal segments case-sensitively.
    pub case_sensitive: bool,
    /// Percent-decode captured parameter values.
    pub decode_params: bool,
}

/// The option set every route registered through [`Router`](crate::Router) is compiled with.
///
/// Routes never override it, so routers composed together always agree on
/// case sensitivity and parameter decoding.
pub const ROUTE_MATCH_OPTIONS: MatchOptions = MatchOptions { case_sensitive: true, decode_params: true };

impl Default for MatchOptions {
    fn default() -> Self {
        ROUTE_MATCH_OPTIONS
    }
}

/// A compiled path template.
pub struct PathPattern {
    template: String,
    /// the value marks routes standing in for an empty trailing wildcard
    matcher: matchit::Router<bool>,
    options: MatchOptions,
}

impl PathPattern {
    /// Compiles `template` with the given options.
    ///
    /// Every variant of the optional groups is inserted into one matcher.
    ///
    /// # Errors
    /// Returns [`RouteError::InvalidPattern`] when the template can't be compiled.
    pub fn compile(template: &str, options: &MatchOptions) -> Result<Self, RouteError> {
        let mut routes = Vec::new();
        for variant in expand_optional(template)? {
            let route = to_matchit_route(template, &variant, options.case_sensitive)?;
            // matchit's catch-all needs at least one character
            let empty_wildcard = route.strip_suffix(WILDCARD_ROUTE).map(str::to_owned);
            routes.push((route, false));
            if let Some(prefix) = empty_wildcard {
                routes.push((prefix, true));
            }
        }

        let mut matcher = matchit::Router::new();
        let mut inserted = HashSet::new();
        for (route, empty_wildcard) in routes {
            if inserted.insert(route.clone()) {
                matcher.insert(route, empty_wildcard).map_err(|e| RouteError::invalid_pattern(template, e))?;
            }
        }

        Ok(Self { template: template.to_owned(), matcher, options: *options })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Matches a concrete path (without query string) against this pattern.
    ///
    /// Returns the captured parameters, or `None` if the path doesn't match.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let lowered;
        let target = if self.options.case_sensitive {
            path
        } else {
            lowered = path.to_ascii_lowercase();
            &lowered
        };

        let matched = self.matcher.at(target).ok()?;

        // ascii lowercasing keeps byte offsets, captures are taken from the original path
        let base = target.as_ptr() as usize;
        let params = matched
            .params
            .iter()
            .map(|(name, value)| {
                let original = (value.as_ptr() as usize)
                    .checked_sub(base)
                    .and_then(|start| path.get(start..start + value.len()))
                    .unwrap_or(value);
                (name.to_owned(), self.decode(original))
            })
            .chain((*matched.value).then(|| (WILDCARD_PARAM.to_owned(), String::new())))
            .collect();

        Some(params)
    }

    fn decode(&self, value: &str) -> String {
        if self.options.decode_params {
            percent_decode_str(value).decode_utf8_lossy().into_owned()
        } else {
            value.to_owned()
        }
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern").field("template", &self.template).field("options", &self.options).finish()
    }
}

/// Expands `(...)` groups into every template they describe, shortest first.
fn expand_optional(template: &str) -> Result<Vec<String>, RouteError> {
    expand_group(&mut template.chars(), template, false)
}

fn expand_group(chars: &mut Chars<'_>, template: &str, nested: bool) -> Result<Vec<String>, RouteError> {
    let mut variants = vec![String::new()];

    while let Some(c) = chars.next() {
        match c {
            '(' => {
                let group = expand_group(chars, template, true)?;
                variants = variants
                    .iter()
                    .flat_map(|head| iter::once(head.clone()).chain(group.iter().map(move |tail| format!("{head}{tail}"))))
                    .collect();
            }
            ')' if nested => return Ok(variants),
            ')' => return Err(RouteError::invalid_pattern(template, "unbalanced ')'")),
            c => variants.iter_mut().for_each(|variant| variant.push(c)),
        }
    }

    if nested {
        return Err(RouteError::invalid_pattern(template, "unclosed optional group"));
    }
    Ok(variants)
}

fn to_matchit_route(template: &str, variant: &str, case_sensitive: bool) -> Result<String, RouteError> {
    let last = variant.split('/').count() - 1;
    let mut route = String::with_capacity(variant.len() + 8);

    for (index, segment) in variant.split('/').enumerate() {
        if index > 0 {
            route.push('/');
        }

        if segment == "*" {
            if index != last {
                return Err(RouteError::invalid_pattern(template, "wildcard must be the last segment"));
            }
            route.push_str(WILDCARD_ROUTE);
        } else if segment.contains('{') {
            // already in matchit syntax
            route.push_str(segment);
        } else if segment.contains('*') {
            return Err(RouteError::invalid_pattern(template, "wildcard must be a whole segment"));
        } else {
            push_segment(&mut route, template, segment, case_sensitive)?;
        }
    }

    Ok(route)
}

fn push_segment(route: &mut String, template: &str, segment: &str, case_sensitive: bool) -> Result<(), RouteError> {
    let mut rest = segment;

    while let Some(colon) = rest.find(':') {
        push_literal(route, &rest[..colon], case_sensitive);

        let after = &rest[colon + 1..];
        let name_len = after.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(after.len());
        if name_len == 0 {
            return Err(RouteError::invalid_pattern(template, "empty parameter name"));
        }

        route.push('{');
        route.push_str(&after[..name_len]);
        route.push('}');
        rest = &after[name_len..];
    }

    push_literal(route, rest, case_sensitive);
    Ok(())
}

fn push_literal(route: &mut String, literal: &str, case_sensitive: bool) {
    if case_sensitive {
        route.push_str(literal);
    } else {
        route.push_str(&literal.to_ascii_lowercase());
    }
}
