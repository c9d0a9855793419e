use super::{HandlerContext, Reply};
use crate::service::launcher::normalize_url;
use crate::ui::Level;

pub fn handle_open(ctx: &mut HandlerContext, command: &str) -> Reply {
    let Some(target) = command.split_whitespace().nth(1) else {
        return Reply::warning("Please specify what to open");
    };

    // anything domain-like is treated as a website
    if target.contains('.') {
        ctx.ui.notice(
            Level::Info,
            &format!("Opening website {target}..."),
        );
        match ctx.launcher.open_website(&normalize_url(target)) {
            Ok(()) => Reply::success(format!("Opening website: {target}")),
            Err(e) => Reply::error(e.to_string()),
        }
    } else {
        match ctx.launcher.open_app(target) {
            Ok(()) => Reply::success(format!("Opening {target}")),
            Err(e) => Reply::error(e.to_string()),
        }
    }
}
