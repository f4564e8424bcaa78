// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to report on (defaults to the current month)")
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Record id")
}

pub fn build_cli() -> Command {
    Command::new("grocerywallet")
        .about("Track grocery deposits, purchases, and spending")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("GROCERYWALLET_DB")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the SQLite database"),
        )
        .subcommand(Command::new("init").about("Create the database and seed defaults"))
        .subcommand(
            Command::new("deposit")
                .about("Money added to the wallet")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("purchase")
                .about("Items bought")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("item").long("item").required(true))
                        .arg(Arg::new("price").long("price").required(true))
                        .arg(
                            Arg::new("qty")
                                .long("qty")
                                .default_value("1")
                                .value_parser(value_parser!(u32).range(1..)),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(
                            Arg::new("today")
                                .long("today")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("month"),
                        )
                        .arg(month_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("item").long("item"))
                        .arg(Arg::new("price").long("price"))
                        .arg(
                            Arg::new("qty")
                                .long("qty")
                                .value_parser(value_parser!(u32).range(1..)),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("item")
                .about("Common items for quick entry")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("price").long("price").required(true)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("price").long("price")),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(
                    Command::new("buy")
                        .about("Record a purchase at the item's default price")
                        .arg(id_arg())
                        .arg(
                            Arg::new("qty")
                                .long("qty")
                                .default_value("1")
                                .value_parser(value_parser!(u32).range(1..)),
                        ),
                ),
        )
        .subcommand(
            Command::new("settings")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("budget").long("budget"))
                        .arg(
                            Arg::new("theme")
                                .long("theme")
                                .value_parser(["dark", "light", "system"]),
                        ),
                ),
        )
        .subcommand(json_args(
            Command::new("summary").about("Balance, today, this month, and budget"),
        ))
        .subcommand(
            Command::new("report")
                .subcommand(json_args(Command::new("daily").arg(month_arg())))
                .subcommand(json_args(
                    Command::new("top").arg(month_arg()).arg(
                        Arg::new("limit")
                            .long("limit")
                            .default_value("5")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(json_args(Command::new("weekday").arg(month_arg())))
                .subcommand(json_args(Command::new("trend")))
                .subcommand(json_args(Command::new("insights").arg(month_arg())))
                .subcommand(json_args(Command::new("month").arg(month_arg())))
                .subcommand(json_args(
                    Command::new("calendar")
                        .about("Spending per day laid out as a month grid")
                        .arg(month_arg()),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write a JSON backup (stdout when --out is omitted)")
                .arg(Arg::new("out").long("out")),
        )
        .subcommand(
            Command::new("import")
                .about("Restore collections from a JSON backup")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("clear")
                .about("Delete every stored record")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm deletion"),
                ),
        )
        .subcommand(Command::new("cleanup").about("Run the daily retention sweep"))
        .subcommand(Command::new("doctor").about("Check stored records for inconsistencies"))
}
