// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::io::Read;

use anyhow::{Context, anyhow};
use ifsift_common::{debug, system::InterfaceRepository};
use ifsift_core::system::SystemRepo;
use ifsift_template::Template;

use crate::commands::EvalArgs;
use crate::terminal::print;
use crate::zprint;

pub fn eval(args: &EvalArgs) -> anyhow::Result<()> {
    let inputs = read_inputs(&args.templates, || {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read template from stdin")?;
        Ok(buf)
    })?;

    let outputs = evaluate(&SystemRepo, &inputs)?;

    if args.debug {
        for (i, (input, output)) in inputs.iter().zip(&outputs).enumerate() {
            if i > 0 {
                print::separator();
            }
            zprint!("[{i}] in: {input:?}");
            zprint!("[{i}] out: {output:?}");
        }
    } else if args.no_newline {
        if !outputs.is_empty() {
            zprint!("{}", outputs.concat());
        }
    } else {
        for output in &outputs {
            zprint!("{output}");
        }
    }
    Ok(())
}

/// Expands `-` into the contents of stdin. Empty stdin contributes nothing.
fn read_inputs<F>(templates: &[String], mut stdin: F) -> anyhow::Result<Vec<String>>
where
    F: FnMut() -> anyhow::Result<String>,
{
    let mut inputs = Vec::with_capacity(templates.len());
    for template in templates {
        if template != "-" {
            inputs.push(template.clone());
            continue;
        }
        let text = stdin()?;
        if !text.is_empty() {
            inputs.push(text);
        }
    }
    Ok(inputs)
}

/// Renders every input in order and stops at the first failure.
fn evaluate(repo: &dyn InterfaceRepository, inputs: &[String]) -> anyhow::Result<Vec<String>> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            debug!(verbosity = 1, "Evaluating template {i}");
            Template::parse(input)
                .and_then(|t| t.execute(repo))
                .map_err(|e| anyhow!("ERROR[{i}] in: {input:?}\n[{i}] msg: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifsift_common::error::Result;
    use ifsift_common::models::{IfAddr, Interface, InterfaceFlags, SockAddr};

    struct MockRepo;

    impl InterfaceRepository for MockRepo {
        fn all_interfaces(&self) -> Result<Vec<IfAddr>> {
            let iface = Interface {
                index: 2,
                name: "eth0".to_string(),
                mtu: 1500,
                flags: InterfaceFlags::UP | InterfaceFlags::BROADCAST,
                hardware_addr: None,
            };
            Ok(vec![IfAddr::new(
                SockAddr::parse("192.168.1.20/24").unwrap(),
                iface,
            )])
        }

        fn default_interface_name(&self) -> Result<String> {
            Ok("eth0".to_string())
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dash_should_read_from_stdin() {
        let inputs = read_inputs(&strings(&["a", "-"]), || Ok("b".to_string())).unwrap();
        assert_eq!(inputs, strings(&["a", "b"]));
    }

    #[test]
    fn empty_stdin_should_yield_nothing() {
        let inputs = read_inputs(&strings(&["-"]), || Ok(String::new())).unwrap();
        assert!(inputs.is_empty());
    }

    #[test]
    fn templates_should_render_in_order() {
        let outputs = evaluate(
            &MockRepo,
            &strings(&["{{GetPrivateIP}}", r#"{{GetAllInterfaces | attr "name"}}"#]),
        )
        .unwrap();
        assert_eq!(outputs, strings(&["192.168.1.20", "eth0"]));
    }

    #[test]
    fn failures_should_name_the_template_index() {
        let err = evaluate(&MockRepo, &strings(&["ok", "{{GetBogus}}"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("ERROR[1] in: \"{{GetBogus}}\""));
        assert!(msg.contains("GetBogus"));
    }
}
