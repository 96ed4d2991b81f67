use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ip::{Family, FormatError};

/// One community's declarative configuration.
///
/// The community's identity is not part of the record; it comes from the
/// record source (the descriptor file name).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<u32>,
    /// Peer name -> per-family peering address
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bgp: BTreeMap<String, BTreeMap<Family, String>>,
    /// Family -> CIDR literals, in declaration order
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<Family, Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    /// Delegated-to ASN -> delegated CIDR literals
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub delegate: BTreeMap<u32, Vec<String>>,
}

impl Record {
    /// All declared network literals with their family tag, IPv4 first
    pub fn network_literals(&self) -> impl Iterator<Item = (Family, &str)> + '_ {
        self.networks
            .iter()
            .flat_map(|(family, literals)| literals.iter().map(move |l| (*family, l.as_str())))
    }

    /// Parse every declared network, keeping failures in place
    pub fn parse_networks(&self) -> Vec<Result<IpNet, FormatError>> {
        self.network_literals()
            .map(|(family, literal)| family.parse_network(literal))
            .collect()
    }

    /// The networks that parse cleanly
    pub fn valid_networks(&self) -> Vec<IpNet> {
        self.parse_networks().into_iter().filter_map(Result::ok).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parsing() {
        let yaml = r#"
asn: 4242420001
bgp:
  alpha:
    ipv4: 10.207.0.1
    ipv6: "fec0::a:cf:0:1"
networks:
  ipv6:
    - "fd42:1::/48"
  ipv4:
    - 172.20.0.0/24
    - 172.20.1.0/24
domains:
  - alpha.mesh
  - 0.2.20.172.in-addr.arpa
delegate:
  4242420099:
    - 172.20.1.128/25
"#;
        let record: Record = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.asn, Some(4242420001));
        assert_eq!(record.bgp["alpha"][&Family::Ipv4], "10.207.0.1");
        assert_eq!(record.domains.len(), 2);
        assert_eq!(record.delegate[&4242420099], vec!["172.20.1.128/25".to_string()]);

        // IPv4 comes first regardless of declaration order
        let literals: Vec<_> = record.network_literals().collect();
        assert_eq!(literals[0], (Family::Ipv4, "172.20.0.0/24"));
        assert_eq!(literals[2], (Family::Ipv6, "fd42:1::/48"));
    }

    #[test]
    fn test_all_fields_optional() {
        let record: Record = serde_yaml::from_str("{}").unwrap();
        assert_eq!(record, Record::default());

        // Unknown fields are ignored
        let record: Record = serde_yaml::from_str("description: hello\nasn: 1").unwrap();
        assert_eq!(record.asn, Some(1));
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        let yaml = "networks:\n  ipv5:\n    - 10.0.0.0/8\n";
        assert!(serde_yaml::from_str::<Record>(yaml).is_err());
    }

    #[test]
    fn test_valid_networks_skips_malformed() {
        let yaml = "networks:\n  ipv4:\n    - 10.0.0.0/8\n    - 10.0.0.1/8\n    - nonsense\n";
        let record: Record = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.parse_networks().len(), 3);
        assert_eq!(record.valid_networks(), vec!["10.0.0.0/8".parse::<IpNet>().unwrap()]);
    }
}
