//! Zone-file style rendering of records for CLI and debug output.

use std::fmt;

use super::{DnsRecord, RecordData};

fn ttl_column(ttl: Option<u32>) -> String {
    ttl.map_or_else(String::new, |t| t.to_string())
}

impl DnsRecord {
    /// Human-readable rendering; same as the `Display` output.
    ///
    /// SOA spans several lines in zone-file layout, every other type is one
    /// line of `name ttl type value` columns.
    pub fn pretty(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_str();
        let ttl = ttl_column(self.ttl);
        let rtype = self.record_type().as_str();

        match &self.data {
            RecordData::A { address } | RecordData::Aaaa { address } => {
                write!(f, "{name:45} {ttl:>6} {rtype:6} {address}")
            }
            RecordData::Cname { target } => {
                write!(f, "{name:45} {ttl:>6} {rtype:6} {}", target.name)
            }
            RecordData::Txt { text } => write!(f, "{name:45} {ttl:>6} {rtype:6} {text}"),
            // NS rows leave the TTL column empty
            RecordData::Ns { ns } => write!(f, "{name:45} {:>6} {rtype:6} {}", "", ns.name),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(
                f,
                "{name:45} {ttl:>6} {rtype:6} {preference:>4} {}",
                exchange.name
            ),
            RecordData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => {
                writeln!(f, "{name:30} IN SOA {} {} (", mname.name, rname.name)?;
                writeln!(f, "{serial:>50} ; Serial")?;
                writeln!(f, "{refresh:>50} ; Refresh")?;
                writeln!(f, "{retry:>50} ; Retry")?;
                writeln!(f, "{expire:>50} ; Expire")?;
                write!(f, "{minimum:>50})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HostName;

    #[test]
    fn a_record_columns() {
        let line = DnsRecord::a("www", "192.0.2.1").with_ttl(300).pretty();
        assert_eq!(line, format!("{:45} {:>6} {:6} 192.0.2.1", "www", "300", "A"));
    }

    #[test]
    fn missing_ttl_leaves_blank_column() {
        let line = DnsRecord::txt("t", "hello").to_string();
        assert_eq!(line, format!("{:45} {:6} {:6} hello", "t", "", "TXT"));
    }

    #[test]
    fn mx_has_preference_column() {
        let record = DnsRecord::new(
            "@",
            RecordData::Mx {
                preference: 10,
                exchange: HostName::new("mail"),
            },
        )
        .with_ttl(3600);
        assert_eq!(
            record.to_string(),
            format!("{:45} {:>6} {:6} {:>4} mail", "@", "3600", "MX", "10")
        );
    }

    #[test]
    fn ns_ignores_ttl() {
        let record = DnsRecord::new(
            "@",
            RecordData::Ns {
                ns: HostName::new("ns3-l2.nic.ru."),
            },
        )
        .with_ttl(3600);
        assert!(!record.to_string().contains("3600"));
    }

    #[test]
    fn soa_is_multiline() {
        let record = DnsRecord::new(
            "@",
            RecordData::Soa {
                mname: HostName::new("ns3-l2.nic.ru."),
                rname: HostName::new("dns.nic.ru."),
                serial: 2_011_112_002,
                refresh: 1440,
                retry: 3600,
                expire: 2_592_000,
                minimum: 600,
            },
        );
        let text = record.pretty();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].ends_with("IN SOA ns3-l2.nic.ru. dns.nic.ru. ("));
        assert_eq!(lines[1], format!("{:>50} ; Serial", 2_011_112_002));
        assert_eq!(lines[5], format!("{:>50})", 600));
    }
}
