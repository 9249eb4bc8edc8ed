#[path = "cli/arg_utils.rs"]
mod arg_utils;
#[path = "cli/constants.rs"]
mod constants;
#[path = "cli/op_mode.rs"]
mod op_mode;
