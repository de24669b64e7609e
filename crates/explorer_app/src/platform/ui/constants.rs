pub const APP_TITLE: &str = "SpaceX Mission Explorer";
pub const APP_TAGLINE: &str =
    "Browse SpaceX launches, filter by mission, and dive into mission details.";
pub const IDLE_MESSAGE: &str = "Type reload to load launches.";
pub const LOADING_MESSAGE: &str = "Loading launches…";
pub const EMPTY_MESSAGE: &str = "No launches match your filters yet.";
pub const NO_PATCH_MESSAGE: &str = "No patch available";
pub const NO_DETAILS_MESSAGE: &str = "No additional mission details provided.";
pub const ALL_YEARS_LABEL: &str = "All years";
pub const RULE_WIDTH: usize = 72;

pub const HELP_TEXT: &str = "\
Commands:
  search <text>        filter by mission name (applied after a short pause)
  year <yyyy|all>      filter by launch year
  success [on|off]     successful launches only
  favorites [on|off]   favorites only
  fav [n|id]           toggle favorite for card n, a launch id, or the open launch
  open <n|id>          show details for card n or a launch id
  lookup <id>          fetch a single launch by id
  close | esc          close the details overlay
  page <n> | next | prev
  reload               fetch launches again
  help | quit";
