//! The orchestrator — modes × groups, dispatched to style processors.
//!
//! A run walks every requested mode and, within each, every design-system
//! group in a fixed order. Each group resolves its own base color (the
//! caller's base, a synthetic neutral, a theme brand color, or a lighter /
//! darker rung next to one) and its own style, then goes through
//! [`process_style`]. A failing cell is logged and recorded; the rest of the
//! grid carries on.

use std::borrow::Cow;

use serde::Deserialize;
use swatch_color::{Color, is_yellow_or_orange};
use swatch_tokens::{
    BackgroundThemeStore, ColorData, HarmoniesState, HostMessage, HostSink, HyperlinkStyle, Mode,
    State, SurfaceStyle, Theme, TokenEmitter, TokenReader,
};

use crate::config::ContrastPolicy;
use crate::error::EngineError;
use crate::processor::{StyleContext, process_style};
use crate::recipe::StyleRecipe;
use crate::state::ColorSources;

/// Every group, in processing order.
pub const GROUPS: [&str; 13] = [
    "Default",
    "White",
    "Black",
    "Grey",
    "Primary",
    "Primary-Light",
    "Primary-Dark",
    "Secondary",
    "Secondary-Light",
    "Secondary-Dark",
    "Tertiary",
    "Tertiary-Light",
    "Tertiary-Dark",
];

/// Everything one run needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTokensParams {
    pub base_color: ColorData,
    pub theme: Theme,
    #[serde(default)]
    pub state_colors: Vec<ColorData>,
    #[serde(default)]
    pub hyperlink_style: HyperlinkStyle,
    #[serde(default)]
    pub safe_colors: Vec<ColorData>,
    pub style: SurfaceStyle,
    #[serde(default)]
    pub harmonies: HarmoniesState,
    /// Modes to process; all four when absent.
    #[serde(default)]
    pub modes: Option<Vec<Mode>>,
    /// Groups to process; all of [`GROUPS`] when absent.
    #[serde(default)]
    pub groups: Option<Vec<String>>,
    #[serde(default)]
    pub policy: ContrastPolicy,
}

impl ProcessTokensParams {
    fn sources(&self) -> ColorSources<'_> {
        ColorSources {
            theme: &self.theme,
            safe_colors: &self.safe_colors,
            state_colors: &self.state_colors,
            harmonies: &self.harmonies,
        }
    }

    fn modes(&self) -> &[Mode] {
        self.modes.as_deref().unwrap_or(Mode::all())
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// Neighbor rungs for the `-Light` and `-Dark` variants of a brand group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantIndices {
    pub light: usize,
    pub dark: usize,
}

/// Where the light and dark variants of a base at `base_index` sit.
///
/// Normally one rung either side. At the ends of the ramp both variants
/// move inward. Yellow and orange bases at rung 4 take both variants from
/// the lighter side, since their ramps darken much faster than they
/// lighten.
#[must_use]
pub fn get_variant_indices(base_index: usize, base_hex: Color) -> VariantIndices {
    match base_index {
        0 => VariantIndices { light: 1, dark: 2 },
        9 => VariantIndices { light: 8, dark: 7 },
        4 if is_yellow_or_orange(base_hex) => VariantIndices { light: 3, dark: 2 },
        i => VariantIndices {
            light: i.saturating_sub(1),
            dark: i + 1,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Base,
    Light,
    Dark,
}

/// What a group name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    Default,
    White,
    Black,
    Grey,
    Brand(State, Variant),
}

impl GroupKind {
    fn parse(group: &str) -> Option<Self> {
        let (head, variant) = match group.rsplit_once('-') {
            Some((head, "Light")) => (head, Variant::Light),
            Some((head, "Dark")) => (head, Variant::Dark),
            _ => (group, Variant::Base),
        };
        let kind = match (head, variant) {
            ("Default", Variant::Base) => Self::Default,
            ("White", Variant::Base) => Self::White,
            ("Black", Variant::Base) => Self::Black,
            ("Grey", Variant::Base) => Self::Grey,
            ("Primary", v) => Self::Brand(State::Primary, v),
            ("Secondary", v) => Self::Brand(State::Secondary, v),
            ("Tertiary", v) => Self::Brand(State::Tertiary, v),
            _ => return None,
        };
        Some(kind)
    }

    /// The style this group is rendered in when `chosen` is the run's style.
    ///
    /// Tonal runs paint White and Grey with colorful-tonal, so the fixed
    /// neutral hex is the surface in every mode.
    const fn style(self, chosen: SurfaceStyle) -> SurfaceStyle {
        let tonal = chosen.is_tonal();
        match self {
            Self::Default => chosen,
            Self::White | Self::Grey if tonal => SurfaceStyle::ColorfulTonal,
            Self::White => SurfaceStyle::LightProfessional,
            Self::Grey => SurfaceStyle::GreyProfessional,
            Self::Black if tonal => SurfaceStyle::DarkTonal,
            Self::Black => SurfaceStyle::DarkProfessional,
            Self::Brand(..) if tonal => SurfaceStyle::ColorfulTonal,
            Self::Brand(..) => SurfaceStyle::ColorfulProfessional,
        }
    }
}

/// The recipe a style is processed with.
#[must_use]
pub const fn processor_for(style: SurfaceStyle) -> &'static StyleRecipe {
    StyleRecipe::for_style(style)
}

/// The style `group` is rendered in for a run in `chosen`, if the group exists.
#[must_use]
pub fn group_style(group: &str, chosen: SurfaceStyle) -> Option<SurfaceStyle> {
    GroupKind::parse(group).map(|kind| kind.style(chosen))
}

/// `data` moved to rung `index` of its `mode` ramp, or unchanged if the
/// ramp has no such rung.
fn at_rung(data: &ColorData, mode: Mode, index: usize) -> Cow<'_, ColorData> {
    match data.shade(mode, index) {
        Some(hex) => Cow::Owned(ColorData {
            base_hex: hex,
            shade_index: index,
            ..data.clone()
        }),
        None => {
            tracing::debug!(color = %data.id, index, %mode, "variant rung missing, using base");
            Cow::Borrowed(data)
        }
    }
}

/// A synthetic neutral with no ramp of its own.
fn neutral(name: &str, hex: Color, shade_index: usize) -> Cow<'static, ColorData> {
    Cow::Owned(ColorData::solid(name, name, hex, shade_index))
}

fn resolve_base<'a>(
    kind: GroupKind,
    params: &'a ProcessTokensParams,
    mode: Mode,
) -> Result<Cow<'a, ColorData>, EngineError> {
    Ok(match kind {
        GroupKind::Default => Cow::Borrowed(&params.base_color),
        GroupKind::White => neutral("White", Color::WHITE, 1),
        GroupKind::Grey => neutral("Grey", Color::rgb8(0x80, 0x80, 0x80), 1),
        GroupKind::Black => neutral("Black", Color::BLACK, 11),
        GroupKind::Brand(state, variant) => {
            let data = params.sources().state_color(state).ok_or_else(|| {
                EngineError::MissingData(format!("no color data for {}", state.name()))
            })?;
            let indices = get_variant_indices(data.shade_index, data.base_hex);
            match variant {
                Variant::Base => Cow::Borrowed(data),
                Variant::Light => at_rung(data, mode, indices.light),
                Variant::Dark => at_rung(data, mode, indices.dark),
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// A cell that did not produce a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFailure {
    pub group: String,
    pub mode: Mode,
    pub reason: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Cells stored, in processing order.
    pub processed: Vec<(String, Mode)>,
    /// Cells skipped for missing inputs.
    pub skipped: Vec<CellFailure>,
    /// Cells that failed for any other reason.
    pub failed: Vec<CellFailure>,
    /// Token writes that reached the sink.
    pub tokens_sent: usize,
}

impl ProcessReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// The token engine: a background store plus the emitter it writes through.
#[derive(Debug)]
pub struct Engine<S> {
    store: BackgroundThemeStore,
    emitter: TokenEmitter<S>,
}

impl<S: HostSink> Engine<S> {
    pub fn new(sink: S) -> Self {
        Self {
            store: BackgroundThemeStore::new(),
            emitter: TokenEmitter::new(sink),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &BackgroundThemeStore {
        &self.store
    }

    /// Mutable store access, for subscribing.
    pub const fn store_mut(&mut self) -> &mut BackgroundThemeStore {
        &mut self.store
    }

    #[must_use]
    pub const fn emitter(&self) -> &TokenEmitter<S> {
        &self.emitter
    }

    pub fn into_parts(self) -> (BackgroundThemeStore, S) {
        (self.store, self.emitter.into_sink())
    }

    /// Process every selected `(mode, group)` cell.
    pub fn process_tokens(&mut self, params: &ProcessTokensParams) -> ProcessReport {
        let groups: Vec<&str> = match &params.groups {
            None => GROUPS.to_vec(),
            Some(wanted) => {
                for name in wanted {
                    if !GROUPS.contains(&name.as_str()) {
                        tracing::warn!(group = %name, "ignoring unknown group");
                    }
                }
                GROUPS
                    .iter()
                    .copied()
                    .filter(|g| wanted.iter().any(|w| w == g))
                    .collect()
            }
        };
        self.process_groups(params, &groups)
    }

    /// Process `base_name` and its `-Light` / `-Dark` variants.
    pub fn process_variants(
        &mut self,
        params: &ProcessTokensParams,
        base_name: &str,
    ) -> ProcessReport {
        let light = format!("{base_name}-Light");
        let dark = format!("{base_name}-Dark");
        self.process_groups(params, &[base_name, light.as_str(), dark.as_str()])
    }

    fn process_groups(&mut self, params: &ProcessTokensParams, groups: &[&str]) -> ProcessReport {
        let mut report = ProcessReport::default();

        for &mode in params.modes() {
            for &group in groups {
                match self.process_cell(params, group, mode) {
                    Ok(sent) => {
                        report.tokens_sent += sent;
                        report.processed.push((group.to_owned(), mode));
                    }
                    Err(EngineError::MissingData(reason)) => {
                        tracing::warn!(group, %mode, %reason, "skipping group");
                        report.skipped.push(CellFailure { group: group.to_owned(), mode, reason });
                    }
                    Err(err) => {
                        tracing::error!(group, %mode, error = %err, "group failed");
                        report.failed.push(CellFailure {
                            group: group.to_owned(),
                            mode,
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }

        if !report.processed.is_empty() {
            self.emitter.notify(HostMessage::RunFontPairings);
        }
        tracing::info!(
            processed = report.processed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            tokens = report.tokens_sent,
            "run complete"
        );
        report
    }

    fn process_cell(
        &mut self,
        params: &ProcessTokensParams,
        group: &str,
        mode: Mode,
    ) -> Result<usize, EngineError> {
        let kind =
            GroupKind::parse(group).ok_or_else(|| EngineError::UnknownGroup(group.to_owned()))?;
        let base = resolve_base(kind, params, mode)?;
        let recipe = processor_for(kind.style(params.style));

        let ctx = StyleContext {
            group,
            base: &base,
            mode,
            sources: params.sources(),
            hyperlink_style: params.hyperlink_style,
            policy: &params.policy,
        };
        process_style(&ctx, recipe, &mut self.store, &mut self.emitter)
    }

    /// Current value of a token: from the store when this session computed
    /// it, otherwise read from the host.
    ///
    /// # Errors
    ///
    /// [`EngineError::Boundary`] when the host read fails or times out.
    pub fn read_token(
        &self,
        reader: &mut TokenReader,
        group: &str,
        mode: Mode,
        variable: &str,
    ) -> Result<Color, EngineError> {
        let local = self
            .store
            .get(group, mode)
            .and_then(|theme| theme.tokens().get(variable).and_then(|v| Color::hex(v)));
        match local {
            Some(color) => Ok(color),
            None => Ok(reader.read(group, mode, variable)?),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
