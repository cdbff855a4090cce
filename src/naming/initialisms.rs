// Common initialisms rendered all-caps in Rust/Go style field names
//
// The table is a sorted constant slice so lookups are a binary search and the
// ordering is checked at compile time.

/// Title-case segment → all-caps initialism. MUST stay sorted by key.
pub const INITIALISMS: &[(&str, &str)] = &[
    ("Acl", "ACL"),
    ("Api", "API"),
    ("Ascii", "ASCII"),
    ("Cpu", "CPU"),
    ("Css", "CSS"),
    ("Dns", "DNS"),
    ("Eof", "EOF"),
    ("Guid", "GUID"),
    ("Html", "HTML"),
    ("Http", "HTTP"),
    ("Https", "HTTPS"),
    ("Id", "ID"),
    ("Ip", "IP"),
    ("Json", "JSON"),
    ("Lhs", "LHS"),
    ("Qps", "QPS"),
    ("Ram", "RAM"),
    ("Rhs", "RHS"),
    ("Rpc", "RPC"),
    ("Sla", "SLA"),
    ("Smtp", "SMTP"),
    ("Sql", "SQL"),
    ("Ssh", "SSH"),
    ("Tcp", "TCP"),
    ("Tls", "TLS"),
    ("Ttl", "TTL"),
    ("Udp", "UDP"),
    ("Ui", "UI"),
    ("Uid", "UID"),
    ("Uri", "URI"),
    ("Url", "URL"),
    ("Utf8", "UTF8"),
    ("Uuid", "UUID"),
    ("Vm", "VM"),
    ("Xml", "XML"),
    ("Xmpp", "XMPP"),
    ("Xsrf", "XSRF"),
    ("Xss", "XSS"),
];

const fn str_less(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut i = 0;
    while i < a.len() && i < b.len() {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
        i += 1;
    }
    a.len() < b.len()
}

const _: () = {
    let mut i = 1;
    while i < INITIALISMS.len() {
        assert!(
            str_less(INITIALISMS[i - 1].0, INITIALISMS[i].0),
            "INITIALISMS must be sorted by key"
        );
        i += 1;
    }
};

/// Look up the all-caps form of a title-case segment ("Id" → "ID")
pub fn lookup_initialism(segment: &str) -> Option<&'static str> {
    INITIALISMS
        .binary_search_by(|(key, _)| (*key).cmp(segment))
        .ok()
        .map(|idx| INITIALISMS[idx].1)
}
