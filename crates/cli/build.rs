use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("serialist")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Serialist Contributors")
        .about("Scrape novel chapters from an index page and optionally translate them")
        .arg(clap::arg!([INDEX_URL] "Index page URL that lists all chapters"))
        .arg(
            clap::arg!(-o --"output-dir" <DIR> "Directory where output .txt files are stored")
                .value_name("DIR")
                .default_value("novel_output")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"start-from" <N> "0-based index in the chapter list to start from").default_value("0"))
        .arg(clap::arg!(--"max-chapters" <N> "Maximum number of chapters to process from --start-from").required(false))
        .arg(clap::arg!(--"no-translate" "Disable translation and save only the original text"))
        .arg(clap::arg!(--"src-lang" <LANG> "Source language code for translation").default_value("zh-TW"))
        .arg(clap::arg!(--"dest-lang" <LANG> "Target language code for translation").default_value("en"))
        .arg(
            clap::arg!(--"request-delay" <SECS> "Seconds to sleep between chapter requests and between retries")
                .default_value("3"),
        )
        .arg(clap::arg!(--"line-delay" <SECS> "Seconds to sleep after each translated line").default_value("0.5"))
        .arg(clap::arg!(--retries <NUM> "Number of attempts for each HTTP request").default_value("3"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("15"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").required(false))
        .arg(
            clap::arg!(--"site-config" <FILE> "Site profile file describing the chapter list and content container")
                .required(false)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script and exit")
                .required(false)
                .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "serialist", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "serialist", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "serialist", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "serialist", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
