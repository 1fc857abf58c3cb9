use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock},
};

use parking_lot::RwLock;

use super::{
    JWA, JoseError, JoseErrorKind, Signer, SignerFactory, Verifier, VerifierFactory,
    algorithm::builtins,
};

static GLOBAL_REGISTRY: LazyLock<AlgorithmRegistry> =
    LazyLock::new(AlgorithmRegistry::with_builtins);

/// Maps algorithm identifiers to the factories creating their
/// [`Signer`] and [`Verifier`] implementations.
///
/// Registration and resolution are safe to call concurrently: every
/// resolution observes either the factory before or after a concurrent
/// registration, never a partial one. Registering an algorithm again
/// replaces the previous factory.
///
/// Most code uses the process-wide [`AlgorithmRegistry::global`] instance,
/// a registry can however also be created and passed explicitly,
/// e.g. to isolate tests or to restrict the accepted algorithms.
pub struct AlgorithmRegistry {
    signers: RwLock<HashMap<JWA, Arc<dyn SignerFactory>>>,
    verifiers: RwLock<HashMap<JWA, Arc<dyn VerifierFactory>>>,
}

impl AlgorithmRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            signers: RwLock::new(HashMap::new()),
            verifiers: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with all built-in algorithms registered:
    /// `HS*`, `RS*`, `PS*`, `ES*` and `EdDSA`.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        {
            let mut signers = registry.signers.write();
            let mut verifiers = registry.verifiers.write();
            for (alg, builtin) in builtins() {
                signers.insert(alg.clone(), builtin.signer_factory());
                verifiers.insert(alg, builtin.verifier_factory());
            }
        }
        registry
    }

    /// The process-wide registry.
    ///
    /// Initialized with the built-in algorithms on first access,
    /// before any caller can resolve from it.
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    /// Register the signer factory for an algorithm,
    /// replacing the factory already registered for it.
    pub fn register_signer(&self, algorithm: JWA, factory: impl SignerFactory) {
        tracing::debug!(%algorithm, "register jws signer");
        self.signers.write().insert(algorithm, Arc::new(factory));
    }

    /// Register the verifier factory for an algorithm,
    /// replacing the factory already registered for it.
    pub fn register_verifier(&self, algorithm: JWA, factory: impl VerifierFactory) {
        tracing::debug!(%algorithm, "register jws verifier");
        self.verifiers.write().insert(algorithm, Arc::new(factory));
    }

    /// Resolve the signer factory registered for an algorithm.
    pub fn resolve_signer(&self, algorithm: &JWA) -> Option<Arc<dyn SignerFactory>> {
        self.signers.read().get(algorithm).cloned()
    }

    /// Resolve the verifier factory registered for an algorithm.
    pub fn resolve_verifier(&self, algorithm: &JWA) -> Option<Arc<dyn VerifierFactory>> {
        self.verifiers.read().get(algorithm).cloned()
    }

    /// Create a [`Signer`] for the algorithm.
    ///
    /// Fails with [`JoseErrorKind::UnsupportedAlgorithm`] if nothing is
    /// registered for it, or if the factory fails.
    pub fn signer(&self, algorithm: &JWA) -> Result<Arc<dyn Signer>, JoseError> {
        // factory is invoked outside of the lock
        let Some(factory) = self.resolve_signer(algorithm) else {
            tracing::debug!(%algorithm, "no jws signer registered");
            return Err(unsupported(algorithm, "no signer registered"));
        };
        factory
            .create()
            .map_err(|err| unsupported(algorithm, "create signer").with_cause(err))
    }

    /// Create a [`Verifier`] for the algorithm.
    ///
    /// Fails with [`JoseErrorKind::UnsupportedAlgorithm`] if nothing is
    /// registered for it, or if the factory fails.
    pub fn verifier(&self, algorithm: &JWA) -> Result<Arc<dyn Verifier>, JoseError> {
        let Some(factory) = self.resolve_verifier(algorithm) else {
            tracing::debug!(%algorithm, "no jws verifier registered");
            return Err(unsupported(algorithm, "no verifier registered"));
        };
        factory
            .create()
            .map_err(|err| unsupported(algorithm, "create verifier").with_cause(err))
    }

    /// Algorithms with a registered signer.
    pub fn signer_algorithms(&self) -> Vec<JWA> {
        self.signers.read().keys().cloned().collect()
    }

    /// Algorithms with a registered verifier.
    pub fn verifier_algorithms(&self) -> Vec<JWA> {
        self.verifiers.read().keys().cloned().collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("signers", &self.signer_algorithms())
            .field("verifiers", &self.verifier_algorithms())
            .finish()
    }
}

/// Register a signer factory in the [global](AlgorithmRegistry::global) registry.
pub fn register_signer(algorithm: JWA, factory: impl SignerFactory) {
    AlgorithmRegistry::global().register_signer(algorithm, factory);
}

/// Register a verifier factory in the [global](AlgorithmRegistry::global) registry.
pub fn register_verifier(algorithm: JWA, factory: impl VerifierFactory) {
    AlgorithmRegistry::global().register_verifier(algorithm, factory);
}

fn unsupported(algorithm: &JWA, message: &'static str) -> JoseError {
    JoseError::new(JoseErrorKind::UnsupportedAlgorithm)
        .with_algorithm(algorithm.clone())
        .with_message(message)
}
