// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Interface Templates
//!
//! A small text-template language whose pipelines select and render host
//! addresses, e.g.
//!
//! ```text
//! {{ GetPrivateInterfaces | include "flags" "up" | limit 1 | attr "address" }}
//! ```
//!
//! A [`Template`] is parsed once and is immutable afterwards, so it can be
//! shared between threads and executed against any [`InterfaceRepository`].

mod error;
mod exec;
mod funcs;
mod lexer;
mod parser;
mod value;

use ifsift_common::debug;
use ifsift_common::error::{Result, TemplateStage};
use ifsift_common::system::InterfaceRepository;
use ifsift_core::system::SystemRepo;

pub use funcs::{BUILTINS, HELPERS, SOURCES};
pub use value::Value;

#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    nodes: Vec<parser::Node>,
}

impl Template {
    pub fn parse(input: &str) -> Result<Self> {
        let nodes = lexer::lex(input)
            .and_then(parser::parse)
            .map_err(|f| f.into_error(TemplateStage::Parse, input))?;

        debug!(
            verbosity = 2,
            "Parsed template {input:?} into {} nodes",
            nodes.len()
        );

        Ok(Self {
            source: input.to_string(),
            nodes,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders the template with every interface address of `repo` bound to
    /// `.` and `$`.
    pub fn execute(&self, repo: &dyn InterfaceRepository) -> Result<String> {
        let ifaddrs = repo.all_interfaces()?;
        self.execute_with(repo, Value::IfAddrs(ifaddrs))
    }

    pub fn execute_with(&self, repo: &dyn InterfaceRepository, dot: Value) -> Result<String> {
        exec::execute(&self.nodes, repo, dot)
            .map_err(|f| f.into_error(TemplateStage::Execute, &self.source))
    }
}

/// Parses and renders `input` against the interfaces of this host.
pub fn render(input: &str) -> Result<String> {
    render_with(&SystemRepo, input)
}

pub fn render_with(repo: &dyn InterfaceRepository, input: &str) -> Result<String> {
    Template::parse(input)?.execute(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifsift_common::error::Error;
    use ifsift_common::models::{IfAddr, Interface, InterfaceFlags, SockAddr};

    struct MockRepo {
        ifaddrs: Vec<IfAddr>,
    }

    impl InterfaceRepository for MockRepo {
        fn all_interfaces(&self) -> Result<Vec<IfAddr>> {
            Ok(self.ifaddrs.clone())
        }

        fn default_interface_name(&self) -> Result<String> {
            Ok("en0".to_string())
        }
    }

    fn ifaddr(addr: &str, name: &str, index: u32, flags: InterfaceFlags) -> IfAddr {
        IfAddr::new(
            SockAddr::parse(addr).unwrap(),
            Interface {
                index,
                name: name.to_string(),
                mtu: 1500,
                flags,
                hardware_addr: None,
            },
        )
    }

    fn repo() -> MockRepo {
        let up = InterfaceFlags::UP | InterfaceFlags::BROADCAST;
        let lo = InterfaceFlags::UP | InterfaceFlags::LOOPBACK;
        MockRepo {
            ifaddrs: vec![
                ifaddr("127.0.0.1/8", "lo0", 1, lo),
                ifaddr("::1", "lo0", 1, lo),
                ifaddr("10.1.2.3/24", "en0", 2, up),
                ifaddr("fe80::1/64", "en0", 2, up),
                ifaddr("203.0.114.7/24", "en0", 2, up),
                ifaddr("172.17.0.1/16", "docker0", 3, InterfaceFlags::BROADCAST),
            ],
        }
    }

    fn run(src: &str) -> String {
        render_with(&repo(), src).unwrap()
    }

    #[test]
    fn private_ip_pipeline_should_render_the_default_address() {
        assert_eq!(
            run(r#"{{GetPrivateInterfaces | limit 1 | join "address" " "}}"#),
            "10.1.2.3"
        );
        assert_eq!(run("{{GetPrivateIP}}"), "10.1.2.3");
        assert_eq!(run("{{GetPublicIP}}"), "203.0.114.7");
    }

    #[test]
    fn filters_should_chain_left_to_right() {
        let src = r#"{{GetAllInterfaces | include "flag" "up" | exclude "name" "^lo" | sort "-type,address" | join "address" ","}}"#;
        assert_eq!(run(src), "fe80::1,10.1.2.3,203.0.114.7");
    }

    #[test]
    fn attr_should_accept_lists_and_records() {
        assert_eq!(
            run(r#"{{GetAllInterfaces | include "name" "docker" | attr "network"}}"#),
            "172.17.0.0/16"
        );
        assert_eq!(
            run(r#"{{with index GetAllInterfaces 2}}{{attr "mask_bits" .}}{{end}}"#),
            "24"
        );
        assert_eq!(run(r#"{{GetAllInterfaces | include "name" "none" | attr "name"}}"#), "");
    }

    #[test]
    fn range_should_bind_dot_and_variables() {
        let src = r#"{{range $i, $e := GetAllInterfaces | include "name" "en0"}}{{$i}}={{.Name}}/{{$e.Index}} {{end}}"#;
        assert_eq!(run(src), "0=en0/2 1=en0/2 2=en0/2 ");

        let empty = r#"{{range GetAllInterfaces | include "name" "none"}}x{{else}}none{{end}}"#;
        assert_eq!(run(empty), "none");
    }

    #[test]
    fn control_flow_should_follow_truthiness() {
        let src = r#"{{if eq (len GetPublicInterfaces) 0}}private{{else if gt (len GetPublicInterfaces) 1}}many{{else}}one{{end}}"#;
        assert_eq!(run(src), "one");

        let vars = r#"{{$n := len GetAllInterfaces}}{{$n = 0}}{{$n}}"#;
        assert_eq!(run(vars), "0");
    }

    #[test]
    fn printf_should_format_records() {
        let src = r#"{{range GetDefaultInterfaces}}{{printf "%s:%d;" .Name .MTU}}{{end}}"#;
        assert_eq!(run(src), "en0:1500;en0:1500;en0:1500;");
    }

    #[test]
    fn trim_markers_should_drop_whitespace() {
        let src = "addr =\n  {{- GetPrivateIP -}}\n;";
        assert_eq!(run(src), "addr =10.1.2.3;");
    }

    #[test]
    fn unknown_function_should_be_a_parse_error() {
        let err = Template::parse("{{GetBogus}}").unwrap_err();
        assert!(matches!(
            err,
            Error::Template {
                stage: TemplateStage::Parse,
                ..
            }
        ));
        assert!(err.to_string().contains("GetBogus"));
    }

    #[test]
    fn pipeline_failures_should_keep_their_kind() {
        let err = render_with(&repo(), r#"{{GetAllInterfaces | include "rfc" "1"}}"#).unwrap_err();
        let Error::Template { stage, source, .. } = err else {
            panic!("expected a template error");
        };
        assert_eq!(stage, TemplateStage::Execute);
        assert!(matches!(source.as_deref(), Some(Error::Rfc(1))));
    }

    #[test]
    fn missing_fields_should_be_execution_errors() {
        let err = render_with(&repo(), "{{range GetAllInterfaces}}{{.Address}}{{end}}").unwrap_err();
        assert!(err.to_string().contains("can't evaluate field Address"));
    }

    #[test]
    fn offset_past_the_end_should_fail() {
        assert!(render_with(&repo(), "{{GetAllInterfaces | offset 7}}").is_err());
        assert_eq!(run(r#"{{GetAllInterfaces | offset -1 | attr "name"}}"#), "docker0");
    }

    #[test]
    fn templates_should_render_repeatedly() {
        let template = Template::parse("{{GetPublicIP}}").unwrap();
        let repo = repo();
        assert_eq!(template.execute(&repo).unwrap(), "203.0.114.7");
        assert_eq!(template.execute(&repo).unwrap(), "203.0.114.7");
        assert_eq!(template.source(), "{{GetPublicIP}}");
    }

    #[test]
    fn dot_should_start_as_the_interface_list() {
        assert_eq!(
            run(r#"{{. | include "name" "lo0" | join "address" " "}}"#),
            "127.0.0.1 ::1"
        );
        assert_eq!(run("{{range .}}{{.Name}},{{end}}"), "lo0,lo0,en0,en0,en0,docker0,");
        assert_eq!(run("{{len $}}"), "6");

        let with = r#"{{with $lo := include "name" "lo0" .}}{{len $lo}}{{end}}"#;
        assert_eq!(run(with), "2");
    }

    #[test]
    fn dot_should_be_bindable() {
        let template = Template::parse("{{.Name}}@{{$.Index}}").unwrap();
        let dot = Value::IfAddr(repo().ifaddrs[2].clone());
        assert_eq!(template.execute_with(&repo(), dot).unwrap(), "en0@2");
    }
}
