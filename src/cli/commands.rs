//! Command dispatch: each subcommand instantiates one structure and drives it.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, OrderArg, StrategyArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{
    BinaryTree, BinaryTreeArena, BinaryTreeNode, DepthFirst, DomainError, SinglyLinkedList, Stack,
    Traversal,
};
use crate::tree_traits::TreeRender;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| CliError::io("resolve current directory", e))?,
    };

    match &cli.command {
        Some(Commands::Tree {
            order,
            strategy,
            arena,
            render,
        }) => {
            let settings = Settings::load(Some(config_dir.as_path()))?;
            cmd_tree(&settings, *order, *strategy, *arena, *render)
        }
        Some(Commands::List { values }) => cmd_list(values),
        Some(Commands::Stack { capacity, values }) => {
            let settings = Settings::load(Some(config_dir.as_path()))?;
            cmd_stack(&settings, *capacity, values)
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(&config_dir),
            ConfigCommands::Init { global } => cmd_config_init(&config_dir, *global),
            ConfigCommands::Path => cmd_config_path(&config_dir),
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// The nine-node tree used throughout the documentation:
///
/// ```text
///        A
///      /   \
///     B     C
///    /     / \
///   D     E   F
///          \  / \
///          G H   J
/// ```
pub fn sample_tree() -> BinaryTree<char> {
    let root = BinaryTreeNode::with_children(
        'A',
        Some(BinaryTreeNode::new('B').with_left(BinaryTreeNode::new('D'))),
        Some(BinaryTreeNode::with_children(
            'C',
            Some(BinaryTreeNode::new('E').with_right(BinaryTreeNode::new('G'))),
            Some(BinaryTreeNode::with_children(
                'F',
                Some(BinaryTreeNode::new('H')),
                Some(BinaryTreeNode::new('J')),
            )),
        )),
    );
    BinaryTree::new(Some(root))
}

#[instrument(level = "debug", skip(settings))]
fn cmd_tree(
    settings: &Settings,
    order: OrderArg,
    strategy: Option<StrategyArg>,
    arena: bool,
    render: bool,
) -> CliResult<()> {
    let strategy = strategy
        .map(Traversal::from)
        .unwrap_or(settings.tree.traversal);
    debug!("strategy: {}", strategy);
    let tree = sample_tree().with_strategy(strategy);

    if arena {
        let tree = BinaryTreeArena::from(tree);
        print_traversals(&tree, order, render, |node| node.value);
    } else {
        print_traversals(&tree, order, render, |node| node.value);
    }
    Ok(())
}

fn print_traversals<D>(tree: &D, order: OrderArg, render: bool, value_of: impl Fn(&D::Node) -> char)
where
    D: DepthFirst + TreeRender,
{
    if render {
        output::info(&tree.to_tree_string());
    }
    for order in order.orders() {
        let mut values = Vec::new();
        tree.traverse(order, |node| values.push(value_of(node)));
        output::action(&order.to_string(), &values.iter().join(" "));
    }
}

#[instrument(level = "debug")]
fn cmd_list(values: &[String]) -> CliResult<()> {
    let mut list = SinglyLinkedList::new(None);
    for value in values {
        list.insert(value.clone());
    }
    output::action("size", &list.size());

    let mut popped = Vec::new();
    loop {
        match list.pop() {
            Ok(value) => popped.push(value),
            Err(DomainError::Underflow { .. }) => break,
            Err(e) => return Err(e.into()),
        }
    }
    output::action("popped", &popped.iter().join(" "));
    output::action("size", &list.size());
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn cmd_stack(settings: &Settings, capacity: Option<usize>, values: &[String]) -> CliResult<()> {
    let capacity = capacity.unwrap_or(settings.stack.default_capacity);
    let mut stack = Stack::new(capacity);

    let mut overflow = None;
    for (pushed, value) in values.iter().enumerate() {
        if let Err(e) = stack.push(value.clone()) {
            output::warning(&format!(
                "{} ({} of {} values rejected)",
                e,
                values.len() - pushed,
                values.len()
            ));
            overflow = Some(e);
            break;
        }
    }
    output::action("size", &format!("{}/{}", stack.len(), stack.capacity()));

    let mut popped = Vec::new();
    while let Ok(value) = stack.pop() {
        popped.push(value);
    }
    output::action("popped", &popped.iter().join(" "));

    match overflow {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn cmd_config_show(config_dir: &Path) -> CliResult<()> {
    let settings = Settings::load(Some(config_dir))?;
    output::info(&settings.to_toml()?);
    Ok(())
}

fn cmd_config_init(config_dir: &Path, global: bool) -> CliResult<()> {
    let path: PathBuf = if global {
        global_config_path()
            .ok_or_else(|| CliError::InvalidArgs("no global config directory available".into()))?
    } else {
        local_config_path(config_dir)
    };
    if path.exists() {
        return Err(CliError::InvalidArgs(format!(
            "config already exists: {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CliError::io(format!("create {}", parent.display()), e))?;
    }
    let template = Settings::default().to_toml()?;
    std::fs::write(&path, template)
        .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
    output::success(&format!("created {}", path.display()));
    Ok(())
}

fn cmd_config_path(config_dir: &Path) -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::action("global", &path.display()),
        None => output::action("global", &"<unavailable>"),
    }
    output::action("local", &local_config_path(config_dir).display());
    Ok(())
}
