//! Iterative resolution engine.
//!
//! One top-level lookup walks the delegation chain starting at the root
//! server: query a server, classify what came back, then either answer,
//! restart for a CNAME target, descend to a glued nameserver, or resolve a
//! nameserver's own address and descend to that. All state for a lookup is
//! threaded explicitly, so the NS sub-lookup re-enters the same engine
//! safely while sharing the lookup-wide query budget.
//!
//! Per delegation level only the first usable nameserver is tried; sibling
//! NS records are not fanned out when it fails. That keeps the query
//! budget predictable at the cost of robustness against partial outages.

use peregrine_cache::RecordCache;
use peregrine_proto::{
    encode_query, Message, Name, Question, RecordType, ResourceRecord, DNS_PORT,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::transport::{Transport, TransportError};
use crate::ResolverConfig;

/// Terminal state of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A non-empty, type-filtered answer was found.
    Answered,

    /// Resolution ran out of places to look.
    NoRecords,

    /// The indirection depth or the query budget was hit.
    Exhausted,
}

/// The result of one top-level lookup. Never an error: failed rounds and
/// exhausted bounds all collapse into a possibly-empty record set.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The records answering the query, filtered to the requested type.
    pub records: Vec<ResourceRecord>,

    /// How the lookup ended.
    pub outcome: Outcome,
}

impl Resolution {
    fn empty(outcome: Outcome) -> Self {
        Self {
            records: Vec::new(),
            outcome,
        }
    }
}

/// One encode/exchange/decode round failing. Recoverable by construction:
/// the round is downgraded to "no records" and the branch moves on.
#[derive(Debug, Error)]
enum RoundError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Format(#[from] peregrine_proto::Error),

    #[error("response id {actual:#06x} does not match query id {expected:#06x}")]
    IdMismatch { expected: u16, actual: u16 },
}

/// Iterative DNS resolver.
///
/// Owns the transport and shares the record cache with whoever wants to
/// enumerate it. One instance serves any number of sequential lookups.
pub struct IterativeResolver<T> {
    transport: T,
    cache: Arc<RecordCache>,
    config: ResolverConfig,
}

impl<T: Transport> IterativeResolver<T> {
    /// Creates a resolver with the default configuration.
    pub fn new(transport: T, cache: Arc<RecordCache>) -> Self {
        Self::with_config(ResolverConfig::default(), transport, cache)
    }

    /// Creates a resolver with a custom configuration.
    pub fn with_config(config: ResolverConfig, transport: T, cache: Arc<RecordCache>) -> Self {
        Self {
            transport,
            cache,
            config,
        }
    }

    /// Returns the shared record cache.
    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }

    /// Resolves a question iteratively, starting from `root`.
    pub fn resolve(&self, root: IpAddr, question: &Question) -> Resolution {
        let mut lookup = Lookup {
            resolver: self,
            root,
            attempts: 0,
        };
        let resolution = lookup.run(question, 0);
        debug!(
            %question,
            outcome = ?resolution.outcome,
            records = resolution.records.len(),
            exchanges = lookup.attempts,
            "lookup finished"
        );
        resolution
    }
}

/// State for one top-level lookup, shared across its sub-lookups.
struct Lookup<'r, T: Transport> {
    resolver: &'r IterativeResolver<T>,
    root: IpAddr,
    /// UDP exchanges performed so far, bounded by the query budget.
    attempts: u32,
}

impl<T: Transport> Lookup<'_, T> {
    fn budget_left(&self) -> bool {
        self.attempts < self.resolver.config.query_budget
    }

    /// Resolves one (name, type) node: cache, then the delegation chain,
    /// then a restart from the root when a CNAME moved the canonical name.
    fn run(&mut self, question: &Question, depth: u32) -> Resolution {
        if depth > self.resolver.config.max_indirection {
            warn!(%question, "maximum indirection level reached");
            return Resolution::empty(Outcome::Exhausted);
        }

        let cached = self.resolver.cache.lookup(question);
        if !cached.is_empty() {
            debug!(%question, records = cached.len(), "answered from cache");
            return Resolution {
                records: cached,
                outcome: Outcome::Answered,
            };
        }

        let mut canonical = question.qname.clone();
        let candidates = self.chain(question, self.root, &mut canonical);

        if !candidates.is_empty() {
            let records: Vec<_> = candidates
                .into_iter()
                .filter(|r| r.rtype() == question.qtype)
                .collect();
            let outcome = if records.is_empty() {
                Outcome::NoRecords
            } else {
                Outcome::Answered
            };
            return Resolution { records, outcome };
        }

        if !self.budget_left() {
            warn!(%question, "query budget exhausted");
            return Resolution::empty(Outcome::Exhausted);
        }

        if canonical != question.qname {
            let next = Question::new_generic(canonical, question.qtype);
            return self.run(&next, depth + 1);
        }

        Resolution::empty(Outcome::NoRecords)
    }

    /// Queries `server` for `question` and follows the delegation chain
    /// downward, returning candidate answers for the canonical name.
    ///
    /// A CNAME that moves `canonical` away from the queried name ends the
    /// chain with no candidates; the caller restarts from the root.
    fn chain(
        &mut self,
        question: &Question,
        server: IpAddr,
        canonical: &mut Name,
    ) -> Vec<ResourceRecord> {
        if !self.budget_left() {
            return Vec::new();
        }

        let records = match self.round(question, server) {
            Ok(records) => records,
            Err(e) => {
                debug!(%server, error = %e, "round failed, treating as empty");
                return Vec::new();
            }
        };

        let mut candidates = Vec::new();
        let mut ns_names: Vec<Name> = Vec::new();
        let mut glue: Vec<(Name, IpAddr)> = Vec::new();

        // Classified in arrival order against the canonical name, which a
        // CNAME updates mid-pass so later records match the new alias.
        for record in &records {
            if record.is_address() && record.name() == &*canonical {
                candidates.push(record.clone());
            } else if record.record_type() == Some(RecordType::CNAME)
                && record.name() == &*canonical
            {
                if let Some(target) = record.rdata().as_cname() {
                    trace!(from = %canonical, to = %target, "following CNAME");
                    *canonical = target.clone();
                }
            } else if record.rtype() == question.qtype && record.name() == &*canonical {
                candidates.push(record.clone());
            } else if record.record_type() == Some(RecordType::NS) {
                if let Some(ns) = record.rdata().as_ns() {
                    ns_names.push(ns.clone());
                }
            } else if record.is_address()
                && ns_names.iter().any(|ns| ns == record.name())
                && !glue.iter().any(|(ns, _)| ns == record.name())
            {
                if let Some(addr) = record.rdata().ip_addr() {
                    glue.push((record.name().clone(), addr));
                }
            }
            // anything else (SOA and unrelated records) is discarded
        }

        if !candidates.is_empty() {
            return candidates;
        }
        if *canonical != question.qname {
            return Vec::new();
        }

        if let Some((ns, addr)) = glue.first() {
            debug!(ns = %ns, %addr, "descending to glued nameserver");
            let addr = *addr;
            return self.chain(question, addr, canonical);
        }

        if let Some(ns) = ns_names.first().cloned() {
            debug!(ns = %ns, "resolving nameserver address from the root");
            let ns_question = Question::new(ns, RecordType::A);
            let ns_addresses = self.run(&ns_question, 0).records;

            for record in ns_addresses {
                let Some(addr) = record.rdata().ip_addr() else {
                    continue;
                };
                let found = self.chain(question, addr, canonical);
                if !found.is_empty() {
                    return found;
                }
                if *canonical != question.qname || !self.budget_left() {
                    return Vec::new();
                }
            }
        }

        Vec::new()
    }

    /// One encode/exchange/decode round against a single server.
    ///
    /// A completed UDP exchange consumes one unit of budget whether or not
    /// the reply decodes. Every decoded record is inserted into the cache.
    fn round(
        &mut self,
        question: &Question,
        server: IpAddr,
    ) -> Result<Vec<ResourceRecord>, RoundError> {
        let (id, payload) = encode_query(question)?;
        let server = SocketAddr::new(server, DNS_PORT);
        debug!(id, %question, %server, "query");

        let reply = self.resolver.transport.exchange(&payload, server)?;
        self.attempts += 1;

        let message = Message::parse(&reply)?;
        if message.id() != id {
            return Err(RoundError::IdMismatch {
                expected: id,
                actual: message.id(),
            });
        }

        debug!(
            id = message.id(),
            authoritative = message.is_authoritative(),
            rcode = %message.rcode(),
            answers = message.answers().len(),
            authority = message.authority().len(),
            additional = message.additional().len(),
            "response"
        );
        for record in message.records() {
            trace!(%record, "decoded record");
            self.resolver.cache.insert(record.clone());
        }

        Ok(message.records().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use peregrine_proto::{Header, HeaderFlags, RData};
    use std::cell::{Cell, RefCell};
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    const ROOT: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn v4(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    /// Scripted reply: the three record sections of one response.
    #[derive(Debug, Clone, Default)]
    struct Reply {
        answers: Vec<ResourceRecord>,
        authority: Vec<ResourceRecord>,
        additional: Vec<ResourceRecord>,
    }

    impl Reply {
        fn answer(records: Vec<ResourceRecord>) -> Self {
            Self {
                answers: records,
                ..Self::default()
            }
        }

        fn referral(authority: Vec<ResourceRecord>, additional: Vec<ResourceRecord>) -> Self {
            Self {
                answers: Vec::new(),
                authority,
                additional,
            }
        }

        fn to_wire(&self, id: u16, question: &Question) -> Vec<u8> {
            fn append(buf: &mut BytesMut, record: &ResourceRecord) {
                record.name().write_wire(buf);
                buf.extend_from_slice(&record.rtype().to_u16().to_be_bytes());
                buf.extend_from_slice(&1u16.to_be_bytes());
                buf.extend_from_slice(&record.ttl().to_be_bytes());

                let mut rdata = BytesMut::new();
                match record.rdata() {
                    RData::A(addr) => rdata.extend_from_slice(&addr.octets()),
                    RData::AAAA(addr) => rdata.extend_from_slice(&addr.octets()),
                    RData::NS(n) | RData::CNAME(n) | RData::SOA(n) => n.write_wire(&mut rdata),
                    RData::MX {
                        preference,
                        exchange,
                    } => {
                        rdata.extend_from_slice(&preference.to_be_bytes());
                        exchange.write_wire(&mut rdata);
                    }
                    RData::Other(_) => unreachable!("not used in engine tests"),
                }
                buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
                buf.extend_from_slice(&rdata);
            }

            let mut header = Header::new(id);
            header.flags = HeaderFlags::QR;
            header.qd_count = 1;
            header.an_count = self.answers.len() as u16;
            header.ns_count = self.authority.len() as u16;
            header.ar_count = self.additional.len() as u16;

            let mut buf = BytesMut::new();
            header.write_to(&mut buf);
            question.write_to(&mut buf);
            for record in self
                .answers
                .iter()
                .chain(&self.authority)
                .chain(&self.additional)
            {
                append(&mut buf, record);
            }
            buf.to_vec()
        }
    }

    /// In-memory transport scripted by a closure from (server, question)
    /// to a reply; `None` simulates a timeout. Records every server
    /// queried, in order.
    struct MockTransport<F> {
        script: F,
        exchanges: Cell<u32>,
        servers: RefCell<Vec<IpAddr>>,
    }

    impl<F> MockTransport<F>
    where
        F: Fn(IpAddr, &Question) -> Option<Reply>,
    {
        fn new(script: F) -> Self {
            Self {
                script,
                exchanges: Cell::new(0),
                servers: RefCell::new(Vec::new()),
            }
        }
    }

    impl<F> Transport for MockTransport<F>
    where
        F: Fn(IpAddr, &Question) -> Option<Reply>,
    {
        fn exchange(&self, payload: &[u8], server: SocketAddr) -> Result<Vec<u8>, TransportError> {
            let query = Message::parse(payload).expect("engine sends well-formed queries");
            let question = query.question().expect("query carries one question").clone();

            self.servers.borrow_mut().push(server.ip());

            match (self.script)(server.ip(), &question) {
                Some(reply) => {
                    self.exchanges.set(self.exchanges.get() + 1);
                    Ok(reply.to_wire(query.id(), &question))
                }
                None => Err(TransportError::Timeout),
            }
        }
    }

    fn resolver<F>(script: F) -> IterativeResolver<MockTransport<F>>
    where
        F: Fn(IpAddr, &Question) -> Option<Reply>,
    {
        IterativeResolver::new(MockTransport::new(script), Arc::new(RecordCache::new()))
    }

    #[test]
    fn test_direct_answer() {
        let web = ResourceRecord::a(name("example.com"), 300, Ipv4Addr::new(192, 0, 2, 7));
        let web2 = web.clone();

        let resolver = resolver(move |_, q| {
            assert_eq!(q.qname, name("example.com"));
            Some(Reply::answer(vec![web2.clone()]))
        });

        let question = Question::new(name("example.com"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::Answered);
        assert_eq!(resolution.records, vec![web]);
    }

    #[test]
    fn test_referral_with_glue_goes_to_glue_address() {
        // Root refers (foo.example, A) to ns1.example with glue; the glue
        // address answers. The engine must query the glue address next,
        // not the root again.
        let glue_addr = v4(53);
        let answer = ResourceRecord::a(name("foo.example"), 60, Ipv4Addr::new(203, 0, 113, 9));
        let answer2 = answer.clone();

        let resolver = resolver(move |server, q| {
            assert_eq!(q.qname, name("foo.example"));
            if server == ROOT {
                Some(Reply::referral(
                    vec![ResourceRecord::ns(
                        name("example"),
                        86400,
                        name("ns1.example"),
                    )],
                    vec![ResourceRecord::a(
                        name("ns1.example"),
                        86400,
                        Ipv4Addr::new(10, 0, 0, 53),
                    )],
                ))
            } else if server == glue_addr {
                Some(Reply::answer(vec![answer2.clone()]))
            } else {
                panic!("unexpected server {server}");
            }
        });

        let question = Question::new(name("foo.example"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::Answered);
        assert_eq!(resolution.records, vec![answer]);
        assert_eq!(*resolver.transport.servers.borrow(), vec![ROOT, glue_addr]);
    }

    #[test]
    fn test_referral_without_glue_resolves_nameserver_first() {
        let ns_addr = v4(5);
        let answer = ResourceRecord::a(name("foo.example"), 60, Ipv4Addr::new(203, 0, 113, 9));
        let answer2 = answer.clone();

        let resolver = resolver(move |server, q| {
            if server == ROOT && q.qname == name("foo.example") {
                // Delegation without glue
                Some(Reply::referral(
                    vec![ResourceRecord::ns(
                        name("example"),
                        86400,
                        name("ns.example"),
                    )],
                    vec![],
                ))
            } else if server == ROOT && q.qname == name("ns.example") {
                Some(Reply::answer(vec![ResourceRecord::a(
                    name("ns.example"),
                    3600,
                    Ipv4Addr::new(10, 0, 0, 5),
                )]))
            } else if server == ns_addr {
                assert_eq!(q.qname, name("foo.example"));
                Some(Reply::answer(vec![answer2.clone()]))
            } else {
                panic!("unexpected query to {server} for {q}");
            }
        });

        let question = Question::new(name("foo.example"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::Answered);
        assert_eq!(resolution.records, vec![answer]);
        assert_eq!(
            *resolver.transport.servers.borrow(),
            vec![ROOT, ROOT, ns_addr]
        );
    }

    #[test]
    fn test_only_first_glued_nameserver_is_tried() {
        // Two glued nameservers; the first one times out. The branch ends
        // empty without falling over to the second.
        let dead = v4(40);
        let alive = v4(41);

        let resolver = resolver(move |server, _| {
            if server == ROOT {
                Some(Reply::referral(
                    vec![
                        ResourceRecord::ns(name("example"), 300, name("ns1.example")),
                        ResourceRecord::ns(name("example"), 300, name("ns2.example")),
                    ],
                    vec![
                        ResourceRecord::a(name("ns1.example"), 300, Ipv4Addr::new(10, 0, 0, 40)),
                        ResourceRecord::a(name("ns2.example"), 300, Ipv4Addr::new(10, 0, 0, 41)),
                    ],
                ))
            } else if server == dead {
                None
            } else if server == alive {
                panic!("second glued nameserver must not be tried");
            } else {
                panic!("unexpected server {server}");
            }
        });

        let question = Question::new(name("foo.example"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::NoRecords);
        assert!(resolution.records.is_empty());
        assert_eq!(*resolver.transport.servers.borrow(), vec![ROOT, dead]);
    }

    #[test]
    fn test_cname_restart_resolves_target() {
        let target = ResourceRecord::a(name("real.example.net"), 60, Ipv4Addr::new(198, 51, 100, 3));
        let target2 = target.clone();

        let resolver = resolver(move |server, q| {
            assert_eq!(server, ROOT);
            if q.qname == name("www.example.com") {
                Some(Reply::answer(vec![ResourceRecord::cname(
                    name("www.example.com"),
                    120,
                    name("real.example.net"),
                )]))
            } else if q.qname == name("real.example.net") {
                Some(Reply::answer(vec![target2.clone()]))
            } else {
                panic!("unexpected question {q}");
            }
        });

        let question = Question::new(name("www.example.com"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::Answered);
        assert_eq!(resolution.records, vec![target]);
    }

    /// Script a CNAME chain c0 -> c1 -> ... -> cN, with an address at cN.
    fn cname_chain_script(chain_len: u32) -> impl Fn(IpAddr, &Question) -> Option<Reply> {
        move |_, q| {
            for k in 0..chain_len {
                if q.qname == name(&format!("c{k}.example")) {
                    return Some(Reply::answer(vec![ResourceRecord::cname(
                        q.qname.clone(),
                        60,
                        name(&format!("c{}.example", k + 1)),
                    )]));
                }
            }
            assert_eq!(q.qname, name(&format!("c{chain_len}.example")));
            Some(Reply::answer(vec![ResourceRecord::a(
                q.qname.clone(),
                60,
                Ipv4Addr::new(192, 0, 2, 200),
            )]))
        }
    }

    #[test]
    fn test_indirection_depth_within_bound_resolves() {
        let resolver = resolver(cname_chain_script(9));
        let question = Question::new(name("c0.example"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::Answered);
        assert_eq!(resolution.records.len(), 1);
        assert_eq!(
            resolution.records[0].rdata().ip_addr(),
            Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 200)))
        );
    }

    #[test]
    fn test_indirection_depth_exceeded_is_exhausted() {
        let resolver = resolver(cname_chain_script(11));
        let question = Question::new(name("c0.example"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::Exhausted);
        assert!(resolution.records.is_empty());
    }

    #[test]
    fn test_query_budget_bounds_endless_referrals() {
        // Every server refers to a fresh glued nameserver and never
        // answers. The lookup must stop after the budget and end empty.
        let resolver = resolver(|server, _| {
            let IpAddr::V4(addr) = server else { unreachable!() };
            let next = addr.octets()[3] + 1;
            let ns = name(&format!("ns{next}.example"));
            Some(Reply::referral(
                vec![ResourceRecord::ns(name("example"), 300, ns.clone())],
                vec![ResourceRecord::a(ns, 300, Ipv4Addr::new(10, 0, 0, next))],
            ))
        });

        let question = Question::new(name("foo.example"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::Exhausted);
        assert!(resolution.records.is_empty());
        assert_eq!(resolver.transport.exchanges.get(), 15);
    }

    #[test]
    fn test_answers_filtered_to_requested_type() {
        // example.com CNAME -> alias.com; alias.com carries both MX and an
        // unrelated A record. Only the MX may come back.
        let mx = ResourceRecord::mx(name("alias.com"), 300, 10, name("mail.alias.com"));
        let mx2 = mx.clone();

        let resolver = resolver(move |_, q| {
            if q.qname == name("example.com") {
                Some(Reply::answer(vec![ResourceRecord::cname(
                    name("example.com"),
                    300,
                    name("alias.com"),
                )]))
            } else {
                assert_eq!(q.qname, name("alias.com"));
                Some(Reply::answer(vec![
                    ResourceRecord::a(name("alias.com"), 300, Ipv4Addr::new(192, 0, 2, 33)),
                    mx2.clone(),
                ]))
            }
        });

        let question = Question::new(name("example.com"), RecordType::MX);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::Answered);
        assert_eq!(resolution.records, vec![mx]);
    }

    #[test]
    fn test_every_decoded_record_lands_in_cache() {
        let glue_addr = v4(53);
        let resolver = resolver(move |server, _| {
            if server == ROOT {
                Some(Reply::referral(
                    vec![ResourceRecord::ns(
                        name("example"),
                        86400,
                        name("ns1.example"),
                    )],
                    vec![ResourceRecord::a(
                        name("ns1.example"),
                        86400,
                        Ipv4Addr::new(10, 0, 0, 53),
                    )],
                ))
            } else {
                assert_eq!(server, glue_addr);
                Some(Reply::answer(vec![ResourceRecord::a(
                    name("foo.example"),
                    60,
                    Ipv4Addr::new(203, 0, 113, 9),
                )]))
            }
        });

        let question = Question::new(name("foo.example"), RecordType::A);
        resolver.resolve(ROOT, &question);

        let cache = resolver.cache();
        assert_eq!(cache.len(), 3);
        assert_eq!(
            cache
                .lookup(&Question::new(name("example"), RecordType::NS))
                .len(),
            1
        );
        assert_eq!(
            cache
                .lookup(&Question::new(name("ns1.example"), RecordType::A))
                .len(),
            1
        );
        assert_eq!(
            cache
                .lookup(&Question::new(name("foo.example"), RecordType::A))
                .len(),
            1
        );

        let mut total = 0;
        cache.for_each(|_, records| total += records.len());
        assert_eq!(total, 3);
    }

    #[test]
    fn test_cached_records_answer_without_network() {
        let cache = Arc::new(RecordCache::new());
        let record = ResourceRecord::a(name("example.com"), 300, Ipv4Addr::new(192, 0, 2, 1));
        cache.insert(record.clone());

        let transport = MockTransport::new(|_, _| panic!("must not hit the network"));
        let resolver = IterativeResolver::new(transport, cache);

        let question = Question::new(name("example.com"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::Answered);
        assert_eq!(resolution.records, vec![record]);
    }

    #[test]
    fn test_timeout_round_ends_empty() {
        let resolver = resolver(|_, _| None);

        let question = Question::new(name("example.com"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::NoRecords);
        assert!(resolution.records.is_empty());
        assert_eq!(resolver.transport.exchanges.get(), 0);
    }

    #[test]
    fn test_soa_and_unrelated_records_discarded() {
        let resolver = resolver(|_, _| {
            Some(Reply::referral(
                vec![ResourceRecord::new(
                    name("example"),
                    peregrine_proto::Type::Known(RecordType::SOA),
                    300,
                    RData::SOA(name("primary.example")),
                )],
                vec![ResourceRecord::a(
                    // address for a name that is neither canonical nor an NS
                    name("unrelated.example"),
                    300,
                    Ipv4Addr::new(192, 0, 2, 50),
                )],
            ))
        });

        let question = Question::new(name("foo.example"), RecordType::A);
        let resolution = resolver.resolve(ROOT, &question);

        assert_eq!(resolution.outcome, Outcome::NoRecords);
        assert!(resolution.records.is_empty());
    }
}
