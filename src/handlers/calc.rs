use super::Reply;
use crate::router::argument_after;
use crate::service::calculator::{evaluate, format_result};
use crate::ui::View;

pub const CALCULATE_USAGE: &str = "Please provide a calculation (e.g., 'Nova calculate 2 + 2')";

pub fn handle_calculation(command: &str) -> Reply {
    let Some(expression) = argument_after(command, "calculate") else {
        return Reply::warning(CALCULATE_USAGE);
    };
    match evaluate(expression) {
        Ok(result) => Reply::with_view(
            format!("The result is: {}", format_result(result)),
            View::Calculation {
                expression: expression.to_string(),
                result,
            },
        ),
        Err(e) => Reply::error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Level;

    #[test]
    fn evaluates_expression() {
        let reply = handle_calculation("calculate 2 + 2");
        assert_eq!(reply.text, "The result is: 4.0");
        assert!(matches!(reply.view, Some(View::Calculation { result, .. }) if result == 4.0));
    }

    #[test]
    fn missing_expression_gets_usage() {
        let reply = handle_calculation("calculate");
        assert_eq!(reply.text, CALCULATE_USAGE);
        assert_eq!(reply.level, Level::Warning);
    }

    #[test]
    fn bad_expression_is_reported() {
        let reply = handle_calculation("calculate 2 + abc");
        assert_eq!(reply.text, "Invalid characters in expression");
        assert_eq!(reply.level, Level::Error);
        assert_eq!(reply.view, None);
    }
}
