// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{arg, crate_version, value_parser, Arg, ArgAction, Command};

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .help("income|expense")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(arg!(--jsonl "Print as JSON lines").action(ArgAction::SetTrue))
}

pub fn build_cli() -> Command {
    Command::new("finplan")
        .about("Personal finance ledger: transactions, budgets, savings goals")
        .version(crate_version!())
        .arg(arg!(--db <PATH> "Path to the local store (overrides FINPLAN_DB)").global(true))
        .arg(
            arg!(--"api-url" <URL> "Auth backend origin (overrides FINPLAN_API_URL)")
                .global(true),
        )
        .subcommand(
            Command::new("login")
                .about("Log in against the auth backend")
                .arg(arg!(--email <EMAIL>).required(true))
                .arg(arg!(--password <PASSWORD>).required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("register")
                .about("Create an account on the auth backend")
                .arg(arg!(--name <NAME>).required(true))
                .arg(arg!(--email <EMAIL>).required(true))
                .arg(arg!(--password <PASSWORD>).required(true))
                .arg(arg!(--confirm <PASSWORD> "Repeat the password").required(true))
                .arg(arg!(--cpf <CPF> "Brazilian taxpayer id (optional)"))
                .arg(arg!(--phone <PHONE> "Phone number (optional)")),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .arg(type_arg().required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--description <TEXT>).required(true))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, defaults to now")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(type_arg())
                        .arg(arg!(--category <CATEGORY>))
                        .arg(arg!(--search <TEXT> "Match description, case-insensitive"))
                        .arg(arg!(--limit <N>).value_parser(value_parser!(usize))),
                ))
                .subcommand(Command::new("rm").arg(arg!(<ID>).required(true))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--limit <AMOUNT>).required(true))
                        .arg(arg!(--month <MONTH> "YYYY-MM, defaults to the current month")),
                )
                .subcommand(
                    Command::new("set")
                        .arg(arg!(<ID>).required(true))
                        .arg(arg!(--category <CATEGORY>))
                        .arg(arg!(--limit <AMOUNT>))
                        .arg(arg!(--month <MONTH>)),
                )
                .subcommand(json_flags(Command::new("list").arg(arg!(--month <MONTH>)))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--target <AMOUNT>).required(true))
                        .arg(arg!(--deadline <DATE> "YYYY-MM-DD, defaults to a year from now"))
                        .arg(arg!(--category <TAG>).default_value("savings")),
                )
                .subcommand(
                    Command::new("contribute")
                        .arg(arg!(<ID>).required(true))
                        .arg(arg!(<AMOUNT>).required(true)),
                )
                .subcommand(
                    Command::new("set")
                        .arg(arg!(<ID>).required(true))
                        .arg(arg!(--name <NAME>))
                        .arg(arg!(--target <AMOUNT>))
                        .arg(arg!(--current <AMOUNT>))
                        .arg(arg!(--deadline <DATE>)),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("settings")
                .about("Currency and theme")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(arg!(--currency <CCY> "BRL|USD|EUR|GBP"))
                        .arg(arg!(--theme <THEME> "light|dark")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboards")
                .subcommand(json_flags(Command::new("month").about("Current month totals")))
                .subcommand(json_flags(
                    Command::new("categories").about("Current month totals per category"),
                ))
                .subcommand(
                    Command::new("recent")
                        .arg(arg!(--limit <N>).value_parser(value_parser!(usize))),
                ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(arg!(--format <FMT> "csv|json").default_value("csv"))
                    .arg(arg!(--out <PATH>).required(true)),
            ),
        )
        .subcommand(Command::new("categories").about("List known categories"))
        .subcommand(
            Command::new("clear")
                .about("Delete all transactions, budgets and goals")
                .arg(arg!(--yes "Confirm").action(ArgAction::SetTrue)),
        )
}
