//! Command system for user actions

/// Command identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Commands under `nav.` move the current slide
    pub fn is_navigation(&self) -> bool {
        self.0.starts_with("nav.")
    }

    // Navigation commands
    pub const NAV_NEXT: &'static str = "nav.next";
    pub const NAV_PREV: &'static str = "nav.prev";
    pub const NAV_FIRST: &'static str = "nav.first";
    pub const NAV_LAST: &'static str = "nav.last";
    pub const NAV_GOTO: &'static str = "nav.goto";

    // App commands
    pub const APP_HELP: &'static str = "app.help";
    pub const APP_CLOSE_HELP: &'static str = "app.close_help";
    pub const APP_TOGGLE_FULLSCREEN: &'static str = "app.toggle_fullscreen";
}

/// Command with optional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: CommandId,
    pub params: CommandParams,
}

/// Command parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandParams {
    /// Target slide for `nav.goto`
    pub int_value: Option<i64>,
}

impl Command {
    pub fn new(id: &str) -> Self {
        Self {
            id: CommandId::new(id),
            params: CommandParams::default(),
        }
    }

    pub fn with_int(mut self, value: i64) -> Self {
        self.params.int_value = Some(value);
        self
    }

    /// `nav.goto` targeting slide `n`
    pub fn goto(n: i64) -> Self {
        Self::new(CommandId::NAV_GOTO).with_int(n)
    }
}
