use serde::Serialize;

use crate::config::{ConfigOverrides, ConfigSource, GitConfigSource, MessageConfig, SuggestConfig, escape_template};

#[derive(Serialize, Debug)]
struct EffectiveConfig {
    #[serde(flatten)]
    message: MessageConfig,
    suggest: SuggestConfig,
}

pub fn handle_config(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = GitConfigSource::new(".", ConfigOverrides::default());
    let effective = EffectiveConfig {
        message: source.load()?,
        suggest: source.load_suggest()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    println!("template:           {}", escape_template(&effective.message.template));
    println!("separator:          {}", effective.message.separator);
    println!(
        "suggest.command:    {}",
        effective.suggest.command.as_deref().unwrap_or("(not set)")
    );
    println!("suggest.timeoutMs:  {}", effective.suggest.timeout_ms);

    Ok(())
}
