pub struct CommandDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "runs",
        aliases: &["r"],
        description: "Back to the run list",
    },
    CommandDef {
        name: "filter",
        aliases: &["f"],
        description: "Open the timeline filter menu",
    },
    CommandDef {
        name: "export",
        aliases: &["exp"],
        description: "Show the channel export link",
    },
    CommandDef {
        name: "channel",
        aliases: &["ch"],
        description: "Open the run attached to a channel (e.g. :channel <id>)",
    },
    CommandDef {
        name: "team",
        aliases: &[],
        description: "Scope the run list to a team (e.g. :team engineering)",
    },
    CommandDef {
        name: "quit",
        aliases: &["q"],
        description: "Quit p9s",
    },
    CommandDef {
        name: "help",
        aliases: &["h"],
        description: "Show help",
    },
];

pub fn matching_commands(input: &str) -> Vec<&'static CommandDef> {
    let input_lower = input.to_lowercase();
    COMMANDS
        .iter()
        .filter(|cmd| {
            cmd.name.starts_with(&input_lower)
                || cmd.aliases.iter().any(|a| a.starts_with(&input_lower))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_commands() {
        assert_eq!(matching_commands("r").len(), 1);
        assert_eq!(matching_commands("r")[0].name, "runs");

        assert_eq!(matching_commands("f").len(), 1);
        assert_eq!(matching_commands("f")[0].name, "filter");

        assert_eq!(matching_commands("e").len(), 1);
        assert_eq!(matching_commands("e")[0].name, "export");

        assert_eq!(matching_commands("t").len(), 1);
        assert_eq!(matching_commands("t")[0].name, "team");

        assert_eq!(matching_commands("ch").len(), 1);
        assert_eq!(matching_commands("ch")[0].name, "channel");

        assert_eq!(matching_commands("q").len(), 1);
        assert_eq!(matching_commands("q")[0].name, "quit");

        assert!(matching_commands("xyz").is_empty());
    }
}
