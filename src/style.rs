//! Declarative class-state styling.
//
//! Instead of mutating presentation properties inline, docks publish class
//! sets on their nodes and own one `StyleSheet`: an ordered table mapping
//! (qualifier classes, target id) to style properties. Each dock's sheet is
//! computed once at construction with every selector scoped by the instance
//! token, so two docks on one scene can never match each other's rules.

use ratatui::style::Color;

use crate::theme;
use crate::token::InstanceToken;

/// Shadow emphasis levels for the embedded surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shadow {
    Light,
    Heavy,
}

/// Resolved presentation properties for one node.
///
/// Fields are optional so rules can be merged; later matching rules win per
/// field, mirroring source-order cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StyleProps {
    /// Whether the node accepts pointer input.
    pub pointer: Option<bool>,
    /// Dimmed rendering (the terminal stand-in for reduced opacity).
    pub dim: Option<bool>,
    pub shadow: Option<Shadow>,
    /// Top-down background ramp on the container.
    pub ramp: Option<bool>,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl StyleProps {
    pub fn merge(&mut self, other: &StyleProps) {
        if other.pointer.is_some() {
            self.pointer = other.pointer;
        }
        if other.dim.is_some() {
            self.dim = other.dim;
        }
        if other.shadow.is_some() {
            self.shadow = other.shadow;
        }
        if other.ramp.is_some() {
            self.ramp = other.ramp;
        }
        if other.fg.is_some() {
            self.fg = other.fg;
        }
        if other.bg.is_some() {
            self.bg = other.bg;
        }
    }
}

/// One rule: applies `props` to the element with id `target` whenever every
/// class in `qualifiers` is present on the target or one of its ancestors.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub qualifiers: Vec<String>,
    pub target: String,
    pub props: StyleProps,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, qualifiers: &[&str], target: &str, props: StyleProps) {
        self.rules.push(Rule {
            qualifiers: qualifiers.iter().map(|q| (*q).to_string()).collect(),
            target: target.to_string(),
            props,
        });
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Merge every rule matching `target` whose qualifiers are all contained
    /// in `ancestry_classes` (the union of class sets along the node's
    /// ancestor chain, including the node itself).
    pub fn resolve<'a, I>(&self, target: &str, ancestry_classes: I) -> StyleProps
    where
        I: Iterator<Item = &'a str> + Clone,
    {
        let mut props = StyleProps::default();
        for rule in &self.rules {
            if rule.target != target {
                continue;
            }
            let satisfied = rule
                .qualifiers
                .iter()
                .all(|q| ancestry_classes.clone().any(|c| c == q));
            if satisfied {
                props.merge(&rule.props);
            }
        }
        props
    }

    /// True when every selector in the sheet is suffixed by `token`.
    pub fn is_scoped_by(&self, token: &InstanceToken) -> bool {
        let suffix = format!("_{token}");
        self.rules.iter().all(|rule| {
            rule.target.ends_with(&suffix)
                && rule.qualifiers.iter().all(|q| q.ends_with(&suffix))
        })
    }
}

/// Build the one scoped sheet a dock owns.
///
/// The sheet carries the interaction-capture consequences of the
/// inside/outside class state: outside, the overlay is the pointer target
/// and the surface is muted; inside, the surface takes the pointer and the
/// emphasis styling switches on.
pub fn scoped_dock_sheet(token: &InstanceToken) -> StyleSheet {
    let overlay = token.scoped("overlay");
    let surface = token.scoped("iframe");
    let container = token.scoped("dock");
    let outside = token.scoped("outside");
    let inside = token.scoped("inside");

    let mut sheet = StyleSheet::new();
    sheet.push(
        &[outside.as_str()],
        &overlay,
        StyleProps {
            pointer: Some(true),
            ..Default::default()
        },
    );
    sheet.push(
        &[outside.as_str()],
        &surface,
        StyleProps {
            pointer: Some(false),
            dim: Some(true),
            shadow: Some(Shadow::Light),
            ..Default::default()
        },
    );
    sheet.push(
        &[outside.as_str()],
        &container,
        StyleProps {
            pointer: Some(false),
            ramp: Some(false),
            ..Default::default()
        },
    );
    sheet.push(
        &[inside.as_str()],
        &overlay,
        StyleProps {
            pointer: Some(false),
            ..Default::default()
        },
    );
    sheet.push(
        &[inside.as_str()],
        &surface,
        StyleProps {
            pointer: Some(true),
            dim: Some(false),
            shadow: Some(Shadow::Heavy),
            ..Default::default()
        },
    );
    sheet.push(
        &[inside.as_str()],
        &container,
        StyleProps {
            pointer: Some(false),
            ramp: Some(true),
            bg: Some(theme::ramp_top()),
            ..Default::default()
        },
    );
    sheet
}

/// Baseline sheet injected into every embedded document when it loads: no
/// chrome, content row centered, holder shrink-wrapped to content. This is
/// what makes the holder report intrinsic content size rather than surface
/// size.
pub fn baseline_frame_sheet() -> StyleSheet {
    let mut sheet = StyleSheet::new();
    sheet.push(
        &[],
        "body",
        StyleProps {
            fg: Some(theme::frame_fg()),
            ..Default::default()
        },
    );
    sheet
}
