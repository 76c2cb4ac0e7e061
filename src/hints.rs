//! Troubleshooting hints picked by substring match on the error message.
//!
//! The match is against upstream error wording, which is not a stable
//! contract. Treat a missing hint as "no idea", not as "not this problem".

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub trigger: &'static str,
    pub lines: &'static [&'static str],
}

pub const HINTS: &[Hint] = &[
    Hint {
        trigger: "Tenant or user not found",
        lines: &[
            "1. Check if your Supabase project is active (not paused)",
            "2. Verify the database password is correct",
            "3. Check if the database user exists",
            "4. Try using the direct connection (not pooler):",
            "   Change port from 6543 (pooler) to 5432 (direct)",
        ],
    },
    Hint {
        trigger: "password authentication failed",
        lines: &[
            "1. The database password might be incorrect",
            "2. Check your Supabase project settings",
        ],
    },
    Hint {
        trigger: "does not exist",
        lines: &[
            "1. The database might not exist",
            "2. Check your Supabase project",
        ],
    },
];

/// Every hint whose trigger appears in `message`, in table order.
pub fn matching_hints(message: &str) -> impl Iterator<Item = &'static Hint> + '_ {
    HINTS.iter().filter(move |hint| message.contains(hint.trigger))
}

impl Hint {
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n🔍 Troubleshooting:")?;
        for line in self.lines {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}
