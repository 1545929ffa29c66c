//! Script bridge over an embedded page object.

use tracing::{debug, info, trace};

use crate::decode::Decode;
use crate::error::{BridgeError, Result};
use crate::executor::{primitive_to_text, PrimitiveResult, ScriptExecutor};
use crate::resolver::{resolve, AddressingStrategy, ObjectIdentifier, HOST_IDENTITY_SCRIPT};
use crate::statement::{ArgumentEncoding, Namespace, ScriptStatement, StatementBuilder};

/// Construction options for a [`ScriptBridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    /// Embedded object id.
    pub object_id: ObjectIdentifier,
    /// Scope key inserted under `content.` for scoped calls.
    pub scope_key: Option<String>,
    /// Pre-built root path; skips host detection.
    pub root_prefix: Option<String>,
    /// Argument quoting mode.
    pub encoding: ArgumentEncoding,
}

impl BridgeOptions {
    pub fn new(object_id: impl Into<ObjectIdentifier>) -> Self {
        Self {
            object_id: object_id.into(),
            scope_key: None,
            root_prefix: None,
            encoding: ArgumentEncoding::default(),
        }
    }

    pub fn with_scope_key(mut self, scope_key: Option<&str>) -> Self {
        self.scope_key = scope_key.map(str::to_string);
        self
    }

    pub fn with_root_prefix(mut self, root_prefix: impl Into<String>) -> Self {
        self.root_prefix = Some(root_prefix.into());
        self
    }

    pub fn with_encoding(mut self, encoding: ArgumentEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Typed accessor surface over an object embedded in a page.
///
/// The root path is fixed at construction; every accessor renders one
/// statement, submits it through the executor and decodes the result.
/// A bridge is meant to be driven by a single caller, one call at a time.
#[derive(Debug)]
pub struct ScriptBridge<E> {
    executor: E,
    object_id: Option<ObjectIdentifier>,
    strategy: Option<AddressingStrategy>,
    statements: StatementBuilder,
}

impl<E: ScriptExecutor> ScriptBridge<E> {
    /// Create a bridge, detecting the host with one round-trip.
    pub fn create(
        executor: E,
        object_id: impl Into<ObjectIdentifier>,
        scope_key: Option<&str>,
    ) -> Result<Self> {
        Self::from_options(executor, BridgeOptions::new(object_id).with_scope_key(scope_key))
    }

    /// Create a bridge from options.
    ///
    /// Detects the host unless `options.root_prefix` is set.
    pub fn from_options(executor: E, options: BridgeOptions) -> Result<Self> {
        ensure_capability(&executor)?;

        let (root, strategy) = match options.root_prefix {
            Some(prefix) => (prefix, None),
            None => {
                let identity = host_identity(&executor)?;
                let strategy = resolve(&identity);
                info!(
                    "Resolved addressing strategy {} for object '{}'",
                    strategy, options.object_id
                );
                (strategy.root_path(&options.object_id), Some(strategy))
            }
        };

        let statements = StatementBuilder::new(root)
            .with_scope_key(options.scope_key.as_deref())
            .with_encoding(options.encoding);

        Ok(Self {
            executor,
            object_id: Some(options.object_id),
            strategy,
            statements,
        })
    }

    /// Create a bridge with a known strategy, without host detection.
    ///
    /// Arguments are embedded verbatim; chain [`with_encoding`](Self::with_encoding)
    /// to change that.
    pub fn with_strategy(
        executor: E,
        object_id: impl Into<ObjectIdentifier>,
        strategy: AddressingStrategy,
        scope_key: Option<&str>,
    ) -> Result<Self> {
        ensure_capability(&executor)?;
        let object_id = object_id.into();
        let statements =
            StatementBuilder::new(strategy.root_path(&object_id)).with_scope_key(scope_key);

        Ok(Self {
            executor,
            object_id: Some(object_id),
            strategy: Some(strategy),
            statements,
        })
    }

    /// Create a bridge over an explicit root path such as `document['panel1'].`.
    ///
    /// Arguments are embedded verbatim; chain [`with_encoding`](Self::with_encoding)
    /// to change that.
    pub fn with_root_prefix(
        executor: E,
        root_prefix: impl Into<String>,
        scope_key: Option<&str>,
    ) -> Result<Self> {
        ensure_capability(&executor)?;

        Ok(Self {
            executor,
            object_id: None,
            strategy: None,
            statements: StatementBuilder::new(root_prefix).with_scope_key(scope_key),
        })
    }

    /// Switch the argument encoding used by every accessor.
    pub fn with_encoding(self, encoding: ArgumentEncoding) -> Self {
        Self {
            statements: self.statements.with_encoding(encoding),
            ..self
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Root path every statement starts with.
    pub fn root_prefix(&self) -> &str {
        self.statements.root()
    }

    /// Detected or configured strategy; `None` for an explicit root prefix.
    pub fn strategy(&self) -> Option<AddressingStrategy> {
        self.strategy
    }

    pub fn object_id(&self) -> Option<&ObjectIdentifier> {
        self.object_id.as_ref()
    }

    pub fn scope_key(&self) -> Option<&str> {
        self.statements.scope_key()
    }

    /// The builder used to render statements.
    pub fn statements(&self) -> &StatementBuilder {
        &self.statements
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Submit a statement and return the raw primitive, `null` included.
    pub fn execute(&self, statement: &ScriptStatement) -> Result<PrimitiveResult> {
        debug!("Executing {}", statement);
        let value = self
            .executor
            .execute(statement.as_str())
            .map_err(|source| BridgeError::ExecutionFailure {
                statement: statement.to_string(),
                source,
            })?;
        trace!("{} => {}", statement, value);
        Ok(value)
    }

    /// Submit a statement and return its textual value.
    pub fn evaluate(&self, statement: &ScriptStatement) -> Result<String> {
        let value = self.execute(statement)?;
        primitive_to_text(&value).ok_or_else(|| BridgeError::ScriptResultMissing {
            statement: statement.to_string(),
        })
    }

    /// Submit a statement and decode its value.
    pub fn evaluate_as<T: Decode>(&self, statement: &ScriptStatement) -> Result<T> {
        T::decode(&self.evaluate(statement)?)
    }

    /// Read a property in any namespace and decode it.
    pub fn read_as<T: Decode>(&self, namespace: Namespace, name: &str) -> Result<T> {
        self.evaluate_as(&self.statements.read(namespace, name))
    }

    /// Call a method in any namespace and decode its result.
    pub fn call_as<T: Decode>(&self, namespace: Namespace, name: &str, args: &[&str]) -> Result<T> {
        self.evaluate_as(&self.statements.call(namespace, name, args))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// `<root><name>(<args>);`
    pub fn call_direct_method(&self, name: &str, args: &[&str]) -> Result<String> {
        self.call_as(Namespace::Direct, name, args)
    }

    /// `<root>content.<name>(<args>);`
    pub fn call_content_method(&self, name: &str, args: &[&str]) -> Result<String> {
        self.call_as(Namespace::Content, name, args)
    }

    /// `<root>content.<scopeKey>.<name>(<args>);`
    pub fn call_scoped_content_method(&self, name: &str, args: &[&str]) -> Result<String> {
        self.call_as(Namespace::ScopedContent, name, args)
    }

    /// `<root><name>;`
    pub fn get_direct_property(&self, name: &str) -> Result<String> {
        self.read_as(Namespace::Direct, name)
    }

    /// `<root>content.<name>;`
    pub fn get_content_property(&self, name: &str) -> Result<String> {
        self.read_as(Namespace::Content, name)
    }

    /// `<root>settings.<name>;`
    pub fn get_settings_property(&self, name: &str) -> Result<String> {
        self.read_as(Namespace::Settings, name)
    }

    /// `<root>content.<scopeKey>.<name>;`
    pub fn get_scoped_content_property(&self, name: &str) -> Result<String> {
        self.read_as(Namespace::ScopedContent, name)
    }

    /// `<root>content.<scopeKey>.<name>='<value>';`
    ///
    /// Returns the value of the assignment expression.
    pub fn set_scoped_content_property(&self, name: &str, value: &str) -> Result<String> {
        self.evaluate(&self.statements.assign(Namespace::ScopedContent, name, value))
    }
}

fn ensure_capability<E: ScriptExecutor>(executor: &E) -> Result<()> {
    if executor.supports_scripts() {
        Ok(())
    } else {
        Err(BridgeError::UnsupportedCapability)
    }
}

fn host_identity<E: ScriptExecutor>(executor: &E) -> Result<String> {
    let value = executor
        .execute(HOST_IDENTITY_SCRIPT)
        .map_err(|source| BridgeError::ExecutionFailure {
            statement: HOST_IDENTITY_SCRIPT.to_string(),
            source,
        })?;
    let identity = primitive_to_text(&value).ok_or_else(|| BridgeError::ScriptResultMissing {
        statement: HOST_IDENTITY_SCRIPT.to_string(),
    })?;
    debug!("Host identity: {}", identity);
    Ok(identity)
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
