/*!
 * Menu Commands
 */

/// Fixed menu shown at startup
pub const MENU: &str = "1. Add program\n\
                        2. Kill program\n\
                        3. Fragmentation\n\
                        4. Print Memory\n\
                        5. Exit\n";

/// Menu entry selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddProgram,
    KillProgram,
    Fragmentation,
    PrintMemory,
    Exit,
}

impl MenuChoice {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().parse::<u8>().ok()? {
            1 => Some(MenuChoice::AddProgram),
            2 => Some(MenuChoice::KillProgram),
            3 => Some(MenuChoice::Fragmentation),
            4 => Some(MenuChoice::PrintMemory),
            5 => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    /// Short name used in command spans
    pub fn name(&self) -> &'static str {
        match self {
            MenuChoice::AddProgram => "add",
            MenuChoice::KillProgram => "kill",
            MenuChoice::Fragmentation => "fragmentation",
            MenuChoice::PrintMemory => "print",
            MenuChoice::Exit => "exit",
        }
    }
}
