//! wg-quick INI parsing for both dialects.

use std::net::IpAddr;
use std::str::FromStr;

use crate::error::ConfigFormatError;

use super::Dialect;
use super::key::{Key, PrivateKey};
use super::model::{Endpoint, Interface, Obfuscation, ParsedTunnel, Peer, all_ips, parse_network_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Interface,
    Peer,
}

#[derive(Debug)]
struct Attribute<'a> {
    line: usize,
    key: String,
    value: &'a str,
}

#[derive(Debug)]
struct Section<'a> {
    kind: SectionKind,
    line: usize,
    attributes: Vec<Attribute<'a>>,
}

/// Parses configuration text in the given dialect
pub fn parse(text: &str, dialect: Dialect) -> Result<ParsedTunnel, ConfigFormatError> {
    let sections = tokenize(text)?;

    let mut interface = None;
    let mut peers = Vec::new();

    for section in &sections {
        match section.kind {
            SectionKind::Interface => {
                if interface.is_some() {
                    return Err(ConfigFormatError::at_line(
                        section.line,
                        "multiple [Interface] sections",
                    ));
                }
                interface = Some(parse_interface(section, dialect)?);
            }
            SectionKind::Peer => peers.push(parse_peer(section)?),
        }
    }

    let interface =
        interface.ok_or_else(|| ConfigFormatError::new("missing [Interface] section"))?;

    Ok(ParsedTunnel { interface, peers })
}

/// Parses raw bytes, rejecting input that is not UTF-8
pub fn parse_bytes(bytes: &[u8], dialect: Dialect) -> Result<ParsedTunnel, ConfigFormatError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ConfigFormatError::new(format!("configuration is not valid UTF-8: {e}")))?;
    parse(text, dialect)
}

fn tokenize(text: &str) -> Result<Vec<Section<'_>>, ConfigFormatError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut sections: Vec<Section<'_>> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line
            .split_once('#')
            .map_or(raw_line, |(content, _)| content)
            .trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let kind = match name.trim().to_ascii_lowercase().as_str() {
                "interface" => SectionKind::Interface,
                "peer" => SectionKind::Peer,
                other => {
                    return Err(ConfigFormatError::at_line(
                        line_no,
                        format!("unknown section [{other}]"),
                    ));
                }
            };
            sections.push(Section {
                kind,
                line: line_no,
                attributes: Vec::new(),
            });
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigFormatError::at_line(
                line_no,
                format!("expected 'Key = Value', found '{line}'"),
            ));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigFormatError::at_line(line_no, "attribute name is empty"));
        }

        let Some(section) = sections.last_mut() else {
            return Err(ConfigFormatError::at_line(
                line_no,
                format!("attribute '{key}' outside of any section"),
            ));
        };
        section.attributes.push(Attribute {
            line: line_no,
            key: key.to_ascii_lowercase(),
            value: value.trim(),
        });
    }

    Ok(sections)
}

fn parse_interface(section: &Section<'_>, dialect: Dialect) -> Result<Interface, ConfigFormatError> {
    let mut private_key = None;
    let mut addresses = Vec::new();
    let mut dns_servers = Vec::new();
    let mut dns_search_domains = Vec::new();
    let mut listen_port = None;
    let mut mtu = None;
    let mut included_applications = Vec::new();
    let mut excluded_applications = Vec::new();
    let mut obfuscation = Obfuscation::default();

    for attr in &section.attributes {
        let result: Result<(), ConfigFormatError> = match attr.key.as_str() {
            "privatekey" => PrivateKey::from_base64(attr.value).map(|key| {
                private_key = Some(key);
            }),
            "address" => parse_network_list(attr.value).map(|nets| addresses.extend(nets)),
            "dns" => {
                for item in split_list(attr.value) {
                    match IpAddr::from_str(item) {
                        Ok(ip) => dns_servers.push(ip),
                        Err(_) => dns_search_domains.push(item.to_string()),
                    }
                }
                Ok(())
            }
            "listenport" => parse_number(attr.value, "ListenPort").map(|v| listen_port = Some(v)),
            "mtu" => parse_number(attr.value, "MTU").map(|v| mtu = Some(v)),
            "includedapplications" => {
                included_applications.extend(split_list(attr.value).map(String::from));
                Ok(())
            }
            "excludedapplications" => {
                excluded_applications.extend(split_list(attr.value).map(String::from));
                Ok(())
            }
            key if dialect.supports_obfuscation() => {
                parse_obfuscation_attribute(&mut obfuscation, key, attr.value)
            }
            _ => Err(unknown_attribute(attr, "Interface")),
        };
        result.map_err(|e| e.or_line(attr.line))?;
    }

    if !included_applications.is_empty() && !excluded_applications.is_empty() {
        return Err(ConfigFormatError::at_line(
            section.line,
            "IncludedApplications and ExcludedApplications cannot both be set",
        ));
    }
    if let (Some(min), Some(max)) = (
        obfuscation.junk_packet_min_size,
        obfuscation.junk_packet_max_size,
    ) && min > max
    {
        return Err(ConfigFormatError::at_line(
            section.line,
            format!("Jmin ({min}) must not exceed Jmax ({max})"),
        ));
    }

    let private_key = private_key.ok_or_else(|| {
        ConfigFormatError::at_line(section.line, "[Interface] is missing PrivateKey")
    })?;

    Ok(Interface {
        private_key,
        addresses,
        dns_servers,
        dns_search_domains,
        listen_port,
        mtu,
        included_applications,
        excluded_applications,
        obfuscation,
    })
}

fn parse_obfuscation_attribute(
    obfuscation: &mut Obfuscation,
    key: &str,
    value: &str,
) -> Result<(), ConfigFormatError> {
    match key {
        "jc" => obfuscation.junk_packet_count = Some(parse_number(value, "Jc")?),
        "jmin" => obfuscation.junk_packet_min_size = Some(parse_number(value, "Jmin")?),
        "jmax" => obfuscation.junk_packet_max_size = Some(parse_number(value, "Jmax")?),
        "s1" => obfuscation.init_packet_junk_size = Some(parse_number(value, "S1")?),
        "s2" => obfuscation.response_packet_junk_size = Some(parse_number(value, "S2")?),
        "h1" => obfuscation.init_packet_magic_header = Some(parse_number(value, "H1")?),
        "h2" => obfuscation.response_packet_magic_header = Some(parse_number(value, "H2")?),
        "h3" => obfuscation.underload_packet_magic_header = Some(parse_number(value, "H3")?),
        "h4" => obfuscation.transport_packet_magic_header = Some(parse_number(value, "H4")?),
        other => {
            return Err(ConfigFormatError::new(format!(
                "unknown attribute '{other}' in [Interface]"
            )));
        }
    }
    Ok(())
}

fn parse_peer(section: &Section<'_>) -> Result<Peer, ConfigFormatError> {
    let mut public_key = None;
    let mut pre_shared_key = None;
    let mut persistent_keepalive = None;
    let mut endpoint = None;
    let mut allowed_ips = Vec::new();

    for attr in &section.attributes {
        let result: Result<(), ConfigFormatError> = match attr.key.as_str() {
            "publickey" => Key::from_base64(attr.value, "PublicKey").map(|key| {
                public_key = Some(key);
            }),
            "presharedkey" => Key::from_base64(attr.value, "PresharedKey").map(|key| {
                pre_shared_key = Some(key);
            }),
            "persistentkeepalive" => parse_keepalive(attr.value).map(|v| persistent_keepalive = v),
            "endpoint" => Endpoint::from_str(attr.value).map(|e| endpoint = Some(e)),
            "allowedips" => parse_network_list(attr.value).map(|nets| allowed_ips.extend(nets)),
            _ => Err(unknown_attribute(attr, "Peer")),
        };
        result.map_err(|e| e.or_line(attr.line))?;
    }

    let public_key = public_key
        .ok_or_else(|| ConfigFormatError::at_line(section.line, "[Peer] is missing PublicKey"))?;
    if allowed_ips.is_empty() {
        allowed_ips = all_ips();
    }

    Ok(Peer {
        public_key,
        pre_shared_key,
        persistent_keepalive,
        endpoint,
        allowed_ips,
    })
}

/// `off` disables keepalive, matching wg-quick
fn parse_keepalive(value: &str) -> Result<Option<u16>, ConfigFormatError> {
    if value.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    parse_number(value, "PersistentKeepalive").map(Some)
}

fn parse_number<T: FromStr>(value: &str, attribute: &str) -> Result<T, ConfigFormatError> {
    value
        .parse::<T>()
        .map_err(|_| ConfigFormatError::new(format!("invalid value '{value}' for {attribute}")))
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn unknown_attribute(attr: &Attribute<'_>, section: &str) -> ConfigFormatError {
    ConfigFormatError::at_line(
        attr.line,
        format!("unknown attribute '{}' in [{section}]", attr.key),
    )
}
