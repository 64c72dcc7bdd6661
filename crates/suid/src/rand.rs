/// A source of entropy bytes for the fill portion of an id.
///
/// Implementations are expected to be fast, non-blocking, and backed by the
/// best available secure randomness. Auxiliary seeding (process id, hostname,
/// environment) is the implementation's concern; the generator only consumes
/// the resulting bytes.
pub trait EntropySource {
    /// Fills `buf` with random bytes.
    fn fill(&self, buf: &mut [u8]);
}
