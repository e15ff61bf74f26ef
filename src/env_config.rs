/// Theme values shared by every rendered widget, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootEnv {
    pub color_text: Option<String>,
    pub color_text_hover: Option<String>,
    pub color_primary: Option<String>,
    pub box_shadow: Option<String>,
    pub widget_background_color: Option<String>,
    pub border_radius: Option<String>,
    pub font_family: Option<String>,
    pub font_size_generic: Option<String>,
}

impl RootEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the environment from any variable source; empty values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            color_text: var("SPFX_COLOR_TEXT"),
            color_text_hover: var("SPFX_COLOR_TEXT_HOVER"),
            color_primary: var("SPFX_COLOR_PRIMARY"),
            box_shadow: var("SPFX_BOX_SHADOW"),
            widget_background_color: var("SPFX_WIDGET_BACKGROUND_COLOR"),
            border_radius: var("SPFX_BORDER_RADIUS"),
            font_family: var("SPFX_FONT_FAMILY"),
            font_size_generic: var("SPFX_FONT_SIZE_GENERIC"),
        }
    }

    /// CSS custom properties for the values that are set.
    pub fn css_variables(&self) -> Vec<(&'static str, &str)> {
        [
            ("--spfx_color_text", &self.color_text),
            ("--spfx_color_text_hover", &self.color_text_hover),
            ("--spfx_color_primary", &self.color_primary),
            ("--spfx_box_shadow", &self.box_shadow),
            ("--spfx_widget_background_color", &self.widget_background_color),
            ("--spfx_border_radius", &self.border_radius),
            ("--spfx_font_family", &self.font_family),
            ("--spfx_font_size_generic", &self.font_size_generic),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }

    pub fn style_attribute(&self) -> String {
        self.css_variables()
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
