//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::domain::{Order, Traversal};

/// Classical data structures: binary tree, singly linked list and fixed-capacity stack
#[derive(Parser, Debug)]
#[command(name = "knuth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .knuth.toml (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Traverse the nine-node sample tree
    Tree {
        /// Visiting order
        #[arg(short, long, value_enum, default_value_t = OrderArg::All)]
        order: OrderArg,
        /// Traversal strategy (default: from config)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Use the arena-backed representation
        #[arg(long)]
        arena: bool,
        /// Print the tree shape before traversing
        #[arg(short, long)]
        render: bool,
    },

    /// Insert values at the head of a linked list, then pop them all
    List {
        /// Values to insert, in order
        values: Vec<String>,
    },

    /// Push values onto a fixed-capacity stack, then pop until empty
    Stack {
        /// Stack capacity (default: from config)
        #[arg(short, long)]
        capacity: Option<usize>,
        /// Values to push, in order
        values: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Pre,
    In,
    Post,
    All,
}

impl OrderArg {
    pub fn orders(self) -> Vec<Order> {
        match self {
            OrderArg::Pre => vec![Order::Preorder],
            OrderArg::In => vec![Order::Inorder],
            OrderArg::Post => vec![Order::Postorder],
            OrderArg::All => Order::ALL.to_vec(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Recursive,
    Iterative,
}

impl From<StrategyArg> for Traversal {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Recursive => Traversal::Recursive,
            StrategyArg::Iterative => Traversal::Iterative,
        }
    }
}
