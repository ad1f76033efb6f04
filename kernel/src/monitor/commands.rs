/// Built-in monitor commands.
///
/// Lookup is an exact match on the whole trimmed line: commands take no
/// arguments, so `hello there` is simply an unknown command.
use core::fmt::Write;

use crate::config::FAULT_PROBE_ADDR;
use crate::hart::Hart;

/// Side effect a command asks the main loop to perform after the line is
/// dispatched. Runs at most once per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Read-modify-write the fault probe address.
    FaultProbe,
}

impl Deferred {
    pub fn run(self, hart: &dyn Hart) {
        match self {
            // Safety: the probe address is unmapped on purpose; the resulting
            // access fault is handled by the trap path.
            Deferred::FaultProbe => unsafe { hart.probe(FAULT_PROBE_ADDR) },
        }
    }
}

/// What a command can reach.
pub struct Context<'a> {
    pub out: &'a mut dyn Write,
    pub hart: &'a dyn Hart,
    pub pending: &'a mut Option<Deferred>,
    pub commands: &'a [Command],
}

pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub run: fn(&mut Context<'_>),
}

/// The default command table.
pub static COMMANDS: &[Command] = &[
    Command { name: "help", help: "list commands", run: cmd_help },
    Command { name: "hello", help: "greet the user", run: cmd_hello },
    Command { name: "test", help: "probe an unmapped address after this line", run: cmd_test },
    Command { name: "break", help: "execute a breakpoint and resume", run: cmd_break },
    Command { name: "illop", help: "execute an illegal instruction", run: cmd_illop },
    Command { name: "opene2k", help: "what architecture is this?", run: cmd_opene2k },
    Command { name: "halt", help: "stop the machine", run: cmd_halt },
];

pub fn lookup<'t>(table: &'t [Command], name: &[u8]) -> Option<&'t Command> {
    table.iter().find(|c| c.name.as_bytes() == name)
}

/// Dispatch a command line to the matching handler.
pub fn dispatch(line: &[u8], ctx: &mut Context<'_>) {
    let name = line.trim_ascii();
    if name.is_empty() {
        return;
    }

    match lookup(ctx.commands, name) {
        Some(cmd) => (cmd.run)(ctx),
        None => {
            let _ = match core::str::from_utf8(name) {
                Ok(s) => writeln!(ctx.out, "command not found: `{}`", s),
                Err(_) => writeln!(ctx.out, "command not found: `{}`", name.escape_ascii()),
            };
        }
    }
}

fn cmd_help(ctx: &mut Context<'_>) {
    for cmd in ctx.commands {
        let _ = writeln!(ctx.out, "  {:<10}{}", cmd.name, cmd.help);
    }
}

fn cmd_hello(ctx: &mut Context<'_>) {
    let _ = writeln!(ctx.out, "Hello, user!");
}

fn cmd_test(ctx: &mut Context<'_>) {
    *ctx.pending = Some(Deferred::FaultProbe);
}

fn cmd_break(ctx: &mut Context<'_>) {
    ctx.hart.breakpoint();
}

fn cmd_illop(ctx: &mut Context<'_>) {
    ctx.hart.illegal_instruction();
}

fn cmd_opene2k(ctx: &mut Context<'_>) {
    let _ = writeln!(ctx.out, "Какое нафиг OpenE2K!? Это RISC-V!!!");
}

fn cmd_halt(ctx: &mut Context<'_>) {
    let _ = writeln!(ctx.out, "halt...");
    ctx.hart.halt()
}
