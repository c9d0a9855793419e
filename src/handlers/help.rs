use super::Reply;
use crate::ui::View;

pub const HELP_TEXT: &str = "\
Available Commands (start with 'Nova'):
---------------------------------------
- Nova open youtube.com              : Opens specified website
- Nova open notepad                  : Opens specified application
- Nova tell me the time              : Shows current time
- Nova tell me the date              : Shows current date
- Nova calculate 2 + 2               : Calculates mathematical expression
- Nova tell me the weather of [city] : Shows weather for specified city
- Nova ask [question]                : Answers a question using AI
- Nova define [term]                 : Defines a term using AI
- Nova history                       : Shows stored command history
- Nova history start / stop          : Turns history recording on or off
- Nova search [term]                 : Searches stored command history
- Nova clear history                 : Deletes stored command history
- Nova status                        : Shows system status
- Nova connection                    : Shows connection status
- Nova functions                     : Lists what Nova can do

Additional Commands:
--------------------
- help    : Shows this help message
- clear   : Clears the screen
- history : Shows commands typed this session
- exit    : Exits the assistant

Tips:
-----
- Always start your commands with 'Nova'
- Type commands in a clear format
";

pub const FUNCTIONS_TEXT: &str = "\
Different functions I can perform:
----------------------------------
1. Tell you the current date and/or time
   example: Nova tell me the time
2. Tell you the current weather
   example: Nova tell me the weather of Pune
   params: city name
3. Calculate a mathematical expression
   example: Nova calculate 2 + 2
   supports: addition, subtraction, multiplication, division, powers
4. Open a desktop app or a website
   examples: Nova open youtube.com, Nova open notepad
5. Answer questions and define terms with AI
   examples: Nova ask what is rust, Nova define entropy
6. Keep, search and clear a history of your commands
   examples: Nova history, Nova search weather, Nova clear history
7. Report system and connection status
   examples: Nova status, Nova connection
";

pub const THANKS_TEXT: &str =
    "Happy to help! Have a great day! Come back to me if you have any doubts";

pub fn handle_help() -> Reply {
    Reply::with_view(HELP_TEXT, View::Help(HELP_TEXT.to_string()))
}

pub fn handle_functions() -> Reply {
    Reply::with_view(FUNCTIONS_TEXT, View::Functions(FUNCTIONS_TEXT.to_string()))
}

pub fn handle_thanks() -> Reply {
    Reply::success(THANKS_TEXT)
}
