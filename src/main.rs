use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

use jot::color;
use jot::config::{self, Config};
use jot::dispatcher::{CommandKind, Dispatcher, WELCOME};
use jot::log::SessionLogger;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = env::args().collect();
    let cli = config::parse_args(args);

    if cli.help {
        print_help();
        return;
    }

    if cli.version {
        println!("jot {}", VERSION);
        return;
    }

    let config = Config::load(&cli);

    let logger = SessionLogger::new(Path::new(&config.log_dir));
    let _ = logger.log_session_start();

    let mut dispatcher =
        Dispatcher::new(&config.data_file).with_default_remind_days(config.remind_days);

    print_banner(WELCOME, config.color);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let input = match line {
            Ok(input) => input,
            Err(_) => break,
        };

        let reply = dispatcher.process(&input);
        let kind = dispatcher.last_kind();
        let _ = logger.log(kind.as_str(), input.trim());

        print_reply(&reply, kind, config.color);

        if kind == CommandKind::Bye {
            break;
        }
        print_prompt(config.color);
    }
}

fn print_banner(text: &str, color_on: bool) {
    if color_on {
        println!("{}", color::banner(text));
    } else {
        println!("{}", text);
    }
    println!();
    print_prompt(color_on);
}

fn print_reply(reply: &str, kind: CommandKind, color_on: bool) {
    if color_on {
        println!("{}", color::reply(reply, kind));
    } else {
        println!("{}", reply);
    }
    println!();
}

fn print_prompt(color_on: bool) {
    if color_on {
        print!("{}", color::prompt("> "));
    } else {
        print!("> ");
    }
    let _ = io::stdout().flush();
}

fn print_help() {
    println!(
        r#"jot - single-user task manager

USAGE:
    jot [OPTIONS]

OPTIONS:
    -h, --help               Show this help
    -V, --version            Show version
    -c, --config <FILE>      Config file (default: jot.toml)
    -f, --file <FILE>        Task save file (default: data/jot.txt)
        --log-dir <DIR>      Session log directory (default: data/log)
        --remind-days <N>    Default window for remind (default: 7)
        --no-color           Disable colored output

COMMANDS (typed at the prompt):
    list                                      Show all tasks
    todo <description>                        Add a to-do
    deadline <description> /by <yyyy-MM-dd>   Add a deadline
    event <description> /from <x> /to <y>     Add an event
    mark <n> / unmark <n>                     Set / clear the done flag
    delete <n>                                Remove a task
    find <keyword>                            Search descriptions
    remind [days]                             Show upcoming tasks
    bye                                       Exit
"#
    );
}
