//! The style processor — one `(group, mode)` cell, start to finish.
//!
//! Given a base color and a [`StyleRecipe`], the processor builds the eight
//! background levels, derives every foreground token for the surface and
//! container sets, resolves the fourteen state icons, and hands the
//! finished [`BackgroundTheme`] to the store and the emitter.
//!
//! Computation ([`compute_theme`]) is pure; [`process_style`] adds the
//! writes and side effects.

use swatch_color::Color;
use swatch_tokens::{
    BackgroundTheme, BackgroundThemeStore, ColorData, ColorShade, HostMessage, HostSink,
    HyperlinkStyle, Level, Mode, State, StateIcons, StyleColors, SurfaceStyle, SurfaceTokens,
    TokenEmitter,
};

use crate::config::ContrastPolicy;
use crate::error::EngineError;
use crate::recipe::StyleRecipe;
use crate::search::{find_border_color, generate_quiet_surface_color};
use crate::state::{CONTAINERS, ColorSources, ContrastRequest, SURFACES, get_contrasting_shade};
use crate::text::{TextStrategy, find_button_color, find_hotlink_color, find_on_surface_text_color};

/// Inputs for one cell.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    /// Group id, e.g. `Primary-Light`.
    pub group: &'a str,
    pub base: &'a ColorData,
    pub mode: Mode,
    pub sources: ColorSources<'a>,
    pub hyperlink_style: HyperlinkStyle,
    pub policy: &'a ContrastPolicy,
}

impl<'a> StyleContext<'a> {
    /// The ramp foregrounds are drawn from.
    ///
    /// Synthetic neutrals carry no ramp of their own and borrow the theme
    /// primary's. An empty slice sends every pick to its black/white
    /// fallback.
    #[must_use]
    pub fn ramp(&self) -> &'a [ColorShade] {
        let own = self.base.shades(self.mode);
        if !own.is_empty() {
            return own;
        }
        self.sources
            .state_color(State::Primary)
            .map(|primary| primary.shades(self.mode))
            .unwrap_or_default()
    }
}

/// Foreground tokens for one background set, minus icons.
struct SetForeground {
    on_color: Color,
    tokens: SurfaceTokens,
}

fn foreground_for(
    ctx: &StyleContext<'_>,
    text: TextStrategy,
    shades: &[ColorShade],
    set: &[Color],
    icon_background: Color,
    icons: StateIcons,
) -> SetForeground {
    let required = ctx.policy.text(ctx.mode);
    let first = set.first().copied().unwrap_or(Color::WHITE);

    let on_color = find_on_surface_text_color(shades, set, text, required);
    let button = find_button_color(shades, set, ctx.mode, text, ctx.policy);
    let hotlink = find_hotlink_color(set, shades, ctx.hyperlink_style, ctx.policy.hotlink);

    SetForeground {
        on_color,
        tokens: SurfaceTokens {
            on_color,
            on_color_quiet: generate_quiet_surface_color(first, on_color, required),
            border: find_border_color(set, on_color, ctx.policy.decorative),
            button: button.button,
            button_text: button.text,
            button_half: button.half,
            button_half_text: button.half_text,
            icon_background,
            icons,
            hotlink: hotlink.color,
            hotlink_invert: hotlink.requires_invert,
        },
    }
}

fn state_icons(ctx: &StyleContext<'_>, levels: &StyleColors, backgrounds: &str) -> StateIcons {
    let names = [backgrounds];
    StateIcons::from_fn(|state| {
        let req = ContrastRequest::new(ctx.mode, &names, state, levels, ctx.sources)
            .with_required(ctx.policy.decorative);
        get_contrasting_shade(&req)
    })
}

/// Compute the full token bundle for a cell.
///
/// # Errors
///
/// [`EngineError::MissingData`] when the group id is empty.
pub fn compute_theme(
    ctx: &StyleContext<'_>,
    recipe: &StyleRecipe,
) -> Result<BackgroundTheme, EngineError> {
    if ctx.group.is_empty() {
        return Err(EngineError::MissingData("group id is empty".into()));
    }

    let levels = recipe.levels(ctx.base.base_hex, ctx.mode);
    let shades = ctx.ramp();
    let chips = recipe.icon_background.resolve(shades, ctx.base.shade_index);

    let surfaces = foreground_for(
        ctx,
        recipe.text,
        shades,
        &levels.surfaces(),
        chips.surfaces,
        state_icons(ctx, &levels, SURFACES),
    );
    let containers = foreground_for(
        ctx,
        recipe.text,
        shades,
        &levels.containers(),
        chips.containers,
        state_icons(ctx, &levels, CONTAINERS),
    );

    let quiet = StyleColors::from_fn(|level| {
        let text = if Level::SURFACES.contains(&level) {
            surfaces.on_color
        } else {
            containers.on_color
        };
        generate_quiet_surface_color(levels.get(level), text, ctx.policy.quiet_level)
    });

    Ok(BackgroundTheme {
        id: ctx.group.to_owned(),
        name: ctx.base.name.clone(),
        base_hex: ctx.base.base_hex,
        style: recipe.style,
        mode: ctx.mode,
        levels,
        quiet,
        surfaces: surfaces.tokens,
        containers: containers.tokens,
    })
}

/// Compute a cell, store it, and emit its tokens.
///
/// Returns the number of token writes that reached the sink.
///
/// # Errors
///
/// Propagates [`compute_theme`] errors; nothing is stored or emitted then.
pub fn process_style<S: HostSink>(
    ctx: &StyleContext<'_>,
    recipe: &StyleRecipe,
    store: &mut BackgroundThemeStore,
    emitter: &mut TokenEmitter<S>,
) -> Result<usize, EngineError> {
    let theme = compute_theme(ctx, recipe)?;
    let border = theme.surfaces.border;

    let sent = emitter.emit_theme(ctx.group, &theme);
    store.set(ctx.group, ctx.mode, theme);

    if ctx.group.contains("Default") {
        emitter.notify(HostMessage::UpdateNavbar {
            group: ctx.group.to_owned(),
        });
    }
    if recipe.style == SurfaceStyle::LightTonal && !ctx.mode.is_dark() {
        emitter.notify(HostMessage::UpdatePageBackgrounds { color: border });
    }

    tracing::info!(group = ctx.group, mode = %ctx.mode, style = %recipe.style, sent, "processed");
    Ok(sent)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{COLORFUL_TONAL, DARK_PROFESSIONAL, LIGHT_PROFESSIONAL, LIGHT_TONAL};
    use crate::testing::{color_data, harmonies, safe_colors, state_colors, theme};
    use crate::text::{NEAR_BLACK, NEAR_WHITE};
    use pretty_assertions::assert_eq;
    use swatch_color::{contrast_ratio, min_contrast};
    use swatch_tokens::{HarmoniesState, Theme};

    struct Fixture {
        theme: Theme,
        safe: Vec<ColorData>,
        states: Vec<ColorData>,
        harmonies: HarmoniesState,
        policy: ContrastPolicy,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                theme: theme(),
                safe: safe_colors(),
                states: state_colors(),
                harmonies: harmonies(),
                policy: ContrastPolicy::default(),
            }
        }

        fn ctx<'a>(&'a self, group: &'a str, base: &'a ColorData, mode: Mode) -> StyleContext<'a> {
            StyleContext {
                group,
                base,
                mode,
                sources: ColorSources {
                    theme: &self.theme,
                    safe_colors: &self.safe,
                    state_colors: &self.states,
                    harmonies: &self.harmonies,
                },
                hyperlink_style: HyperlinkStyle::Brand,
                policy: &self.policy,
            }
        }
    }

    fn emitter() -> TokenEmitter<Vec<HostMessage>> {
        TokenEmitter::new(Vec::new())
    }

    // ── compute_theme ───────────────────────────────────────────────

    #[test]
    fn light_tonal_default_scenario() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let theme = compute_theme(&fx.ctx("Default", &base, Mode::AaLight), &LIGHT_TONAL).unwrap();
        let tokens = theme.tokens();

        let surface = Color::hex(&tokens["Surface"]).unwrap();
        let icon = Color::hex(&tokens["Surface-Icon-Primary"]).unwrap();
        assert!(contrast_ratio(surface, Color::WHITE) >= 1.0);
        assert!(contrast_ratio(icon, surface) >= 3.1, "icon {icon} on {surface}");
    }

    #[test]
    fn icons_reach_decorative_contrast_on_every_level() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        for &mode in Mode::all() {
            let t = compute_theme(&fx.ctx("Primary", &base, mode), &LIGHT_TONAL).unwrap();
            for state in State::ALL {
                assert!(min_contrast(t.surfaces.icons.get(state), &t.levels.surfaces()) >= 3.1);
                assert!(min_contrast(t.containers.icons.get(state), &t.levels.containers()) >= 3.1);
            }
        }
    }

    #[test]
    fn text_reaches_mode_tier() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        for &mode in Mode::all() {
            let t = compute_theme(&fx.ctx("Default", &base, mode), &LIGHT_TONAL).unwrap();
            let c = min_contrast(t.surfaces.on_color, &t.levels.surfaces());
            assert!(c >= mode.text_contrast(), "{mode}: {c}");
        }
    }

    #[test]
    fn quiet_levels_stay_subtle_but_visible() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let t = compute_theme(&fx.ctx("Default", &base, Mode::AaLight), &LIGHT_TONAL).unwrap();
        for level in Level::ALL {
            let c = contrast_ratio(t.quiet.get(level), t.levels.get(level));
            assert!(c >= 1.15, "{} quiet contrast {c}", level.token_name());
        }
    }

    #[test]
    fn professional_text_is_near_black_or_white() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let light =
            compute_theme(&fx.ctx("White", &base, Mode::AaLight), &LIGHT_PROFESSIONAL).unwrap();
        assert_eq!(light.surfaces.on_color, NEAR_BLACK);
        let dark =
            compute_theme(&fx.ctx("Black", &base, Mode::AaDark), &DARK_PROFESSIONAL).unwrap();
        assert_eq!(dark.surfaces.on_color, NEAR_WHITE);
    }

    #[test]
    fn half_button_is_button_at_80() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let t = compute_theme(&fx.ctx("Default", &base, Mode::AaaDark), &COLORFUL_TONAL).unwrap();
        for set in [t.surfaces, t.containers] {
            assert_eq!(set.button_half.to_hex(), format!("{}80", set.button.to_hex()));
        }
    }

    #[test]
    fn colorful_tonal_icon_chip_from_ramp() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let t = compute_theme(&fx.ctx("Primary", &base, Mode::AaLight), &COLORFUL_TONAL).unwrap();
        assert_eq!(t.surfaces.icon_background, base.shade(Mode::AaLight, 0).unwrap());
        assert_eq!(t.containers.icon_background, base.shade(Mode::AaLight, 1).unwrap());

        let t = compute_theme(&fx.ctx("Primary", &base, Mode::AaLight), &LIGHT_TONAL).unwrap();
        assert_eq!(t.surfaces.icon_background, Color::TRANSPARENT);
    }

    #[test]
    fn neutral_base_borrows_primary_ramp() {
        let fx = Fixture::new();
        let white = ColorData::solid("White", "White", Color::WHITE, 1);
        let ctx = fx.ctx("White", &white, Mode::AaLight);
        assert_eq!(ctx.ramp().len(), 10);
        let t = compute_theme(&ctx, &LIGHT_TONAL).unwrap();
        let primary_ramp = fx.theme.colors.primary.clone();
        let swatch_tokens::ThemeColor::Resolved(primary) = primary_ramp else {
            panic!("fixture primary is resolved");
        };
        assert!(primary.shades(Mode::AaLight).iter().any(|s| s.hex == t.surfaces.on_color));
    }

    #[test]
    fn empty_group_is_missing_data() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let err = compute_theme(&fx.ctx("", &base, Mode::AaLight), &LIGHT_TONAL).unwrap_err();
        assert!(matches!(err, EngineError::MissingData(_)));
    }

    #[test]
    fn compute_is_deterministic() {
        let fx = Fixture::new();
        let base = color_data("brand", "#C2410C", 4);
        let a = compute_theme(&fx.ctx("Default", &base, Mode::AaaLight), &COLORFUL_TONAL).unwrap();
        let b = compute_theme(&fx.ctx("Default", &base, Mode::AaaLight), &COLORFUL_TONAL).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    // ── process_style ───────────────────────────────────────────────

    #[test]
    fn process_stores_and_emits_once() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let mut store = BackgroundThemeStore::new();
        let mut emitter = emitter();

        let ctx = fx.ctx("Primary", &base, Mode::AaDark);
        let sent = process_style(&ctx, &COLORFUL_TONAL, &mut store, &mut emitter).unwrap();

        let stored = store.get("Primary", Mode::AaDark).unwrap();
        assert_eq!(sent, stored.tokens().len());
        assert_eq!(emitter.sink().len(), sent);

        // Icon tokens go out exactly once.
        let icon_writes = emitter
            .sink()
            .iter()
            .filter(|m| {
                matches!(m, HostMessage::UpdateToken(u) if u.variable == "Surface-Icon-Primary")
            })
            .count();
        assert_eq!(icon_writes, 1);

        // A second identical run sends nothing new.
        let again = process_style(&ctx, &COLORFUL_TONAL, &mut store, &mut emitter).unwrap();
        assert_eq!(again, 0);
    }

    #[test]
    fn default_group_updates_navbar() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let mut store = BackgroundThemeStore::new();
        let mut emitter = emitter();
        let ctx = fx.ctx("Default", &base, Mode::AaDark);
        process_style(&ctx, &COLORFUL_TONAL, &mut store, &mut emitter).unwrap();
        assert!(emitter.sink().contains(&HostMessage::UpdateNavbar { group: "Default".into() }));
        assert!(
            !emitter.sink().iter().any(|m| matches!(m, HostMessage::UpdatePageBackgrounds { .. }))
        );
    }

    #[test]
    fn light_tonal_light_mode_updates_page_background() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let mut store = BackgroundThemeStore::new();
        let mut emitter = emitter();
        let ctx = fx.ctx("Primary", &base, Mode::AaaLight);
        process_style(&ctx, &LIGHT_TONAL, &mut store, &mut emitter).unwrap();
        let border = store.get("Primary", Mode::AaaLight).unwrap().surfaces.border;
        assert!(emitter.sink().contains(&HostMessage::UpdatePageBackgrounds { color: border }));
        assert!(!emitter.sink().iter().any(|m| matches!(m, HostMessage::UpdateNavbar { .. })));
    }

    #[test]
    fn failed_cell_writes_nothing() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let mut store = BackgroundThemeStore::new();
        let mut emitter = emitter();
        let ctx = fx.ctx("", &base, Mode::AaLight);
        assert!(process_style(&ctx, &LIGHT_TONAL, &mut store, &mut emitter).is_err());
        assert!(store.is_empty());
        assert!(emitter.sink().is_empty());
    }

    #[test]
    fn tertiary_icon_resolves_through_safe_catalog() {
        let fx = Fixture::new();
        let base = color_data("brand", "#3366CC", 5);
        let t = compute_theme(&fx.ctx("Default", &base, Mode::AaLight), &LIGHT_TONAL).unwrap();
        let gold = &fx.safe[0];
        let icon = t.surfaces.icons.get(State::Tertiary);
        assert!(gold.shades(Mode::AaLight).iter().any(|s| s.hex == icon));
    }
}
