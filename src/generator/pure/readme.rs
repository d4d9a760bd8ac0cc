use crate::generator::types::HandlerAnswers;

/// `README.md` placed next to a generated handler.
pub fn render_readme(answers: &HandlerAnswers) -> String {
    let name = &answers.handler_name;
    let steam_line = if answers.steam_id.is_empty() {
        String::new()
    } else {
        format!("- **Steam App ID**: {}\n", answers.steam_id)
    };

    format!(
        "# {name} Handler for Nucleus Co-op

## Game Information
- **Game Name**: {game}
- **Executable Name**: {exe}
{steam_line}- **Max Players**: {max}

## Description
This handler enables cooperative play for {game} using Nucleus Co-op.

## Installation
1. Copy this handler folder (`{name}`) to the Nucleus Co-op handlers directory (`handlers`) in your Nucleus Co-op installation.
2. Launch Nucleus Co-op, select this handler, and follow the on-screen instructions to set up and play.

## Notes
- Additional configuration may be required for optimal performance (e.g., adjust paths in `{name}.js`).

## Development
- Edit `{name}.js` to complete the handler logic (e.g., paths, input hooks, launch arguments).
- Test the handler using the Nucleus Co-op interface or the `test-handler` tool.
",
        name = name,
        game = answers.game_name,
        exe = answers.executable_name,
        steam_line = steam_line,
        max = answers.max_players,
    )
}
