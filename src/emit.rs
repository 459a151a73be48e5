//! Assertion emitter: one [`TestVector`] in, an ordered list of [`Assertion`]s out.
//!
//! Emission order for a positive vector is fixed: parse succeeds, host count,
//! hosts by index, credentials, database, then the option clause. A negative
//! vector produces a single [`Assertion::ParseFails`] and nothing else.

use crate::assertion::{Assertion, Field, Literal};
use crate::config::OptionKeys;
use crate::errors::{GenError, GenResult};
use crate::vectors::{AuthSpec, OptionValue, TestVector};
use std::time::Duration;

/// Assertions for one vector, plus the option keys that were not asserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emission {
    pub assertions: Vec<Assertion>,
    pub ignored_options: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    keys: &'a OptionKeys,
}

impl<'a> Emitter<'a> {
    pub fn new(keys: &'a OptionKeys) -> Self {
        Self { keys }
    }

    /// Builds the assertion list for `vector`.
    ///
    /// Fails only when one of the understood options carries a value of the
    /// wrong shape; such a vector cannot be turned into meaningful checks.
    pub fn emit(&self, vector: &TestVector) -> GenResult<Emission> {
        let uri = Literal::new(&vector.uri);
        if !vector.valid {
            return Ok(Emission {
                assertions: vec![Assertion::ParseFails { uri }],
                ignored_options: Vec::new(),
            });
        }

        let mut assertions = vec![Assertion::ParseSucceeds { uri }];

        // Hosts
        assertions.push(Assertion::HostCount {
            expected: vector.hosts.len(),
        });
        for (index, host) in vector.hosts.iter().enumerate() {
            assertions.push(Assertion::HostEquals {
                index,
                expected: Literal::new(&host.to_string()),
            });
        }

        // Credentials
        match &vector.auth {
            None => {
                assertions.push(Assertion::FieldEquals {
                    field: Field::Username,
                    expected: Literal::empty(),
                });
                assertions.push(Assertion::PasswordUnset);
            }
            Some(auth) => {
                assertions.push(Assertion::field(Field::Username, &auth.username));
                assertions.push(Assertion::field(Field::Password, &auth.password));
            }
        }

        // Database is checked even without credentials.
        let zero = AuthSpec::default();
        let auth = vector.auth.as_ref().unwrap_or(&zero);
        assertions.push(Assertion::field(Field::Database, &auth.database));

        let mut ignored_options = Vec::new();
        if !vector.options.is_empty() {
            self.emit_options(vector, &mut assertions)?;
            ignored_options = vector
                .options
                .keys()
                .filter(|key| !self.keys.is_known(key))
                .cloned()
                .collect();
        }

        Ok(Emission {
            assertions,
            ignored_options,
        })
    }

    fn emit_options(&self, vector: &TestVector, out: &mut Vec<Assertion>) -> GenResult<()> {
        let options = &vector.options;

        let mechanism = self.string_option(vector, &self.keys.auth_mechanism)?;
        out.push(Assertion::field(Field::AuthMechanism, mechanism));

        let properties_key = &self.keys.auth_mechanism_properties;
        match options.get(properties_key) {
            None => {}
            Some(OptionValue::Mapping(properties)) => {
                for (key, value) in properties {
                    let Some(text) = value.scalar_text() else {
                        return Err(GenError::malformed_option(
                            &vector.description,
                            &format!("{properties_key}.{key}"),
                            "a scalar",
                            value.kind(),
                        ));
                    };
                    out.push(Assertion::PropertyEquals {
                        key: Literal::new(key),
                        expected: Literal::new(&text),
                    });
                }
            }
            Some(other) => {
                return Err(GenError::malformed_option(
                    &vector.description,
                    properties_key,
                    "a mapping",
                    other.kind(),
                ));
            }
        }

        let replica_set = self.string_option(vector, &self.keys.replica_set)?;
        out.push(Assertion::field(Field::ReplicaSet, replica_set));

        let timeout_key = &self.keys.w_timeout_ms;
        match options.get(timeout_key) {
            None => {}
            Some(OptionValue::Integer(millis)) => {
                let millis = u64::try_from(*millis).map_err(|_| {
                    GenError::malformed_option(
                        &vector.description,
                        timeout_key,
                        "a non-negative integer",
                        millis.to_string(),
                    )
                })?;
                out.push(Assertion::WriteTimeout {
                    expected: Duration::from_millis(millis),
                });
            }
            Some(other) => {
                return Err(GenError::malformed_option(
                    &vector.description,
                    timeout_key,
                    "an integer",
                    other.kind(),
                ));
            }
        }

        Ok(())
    }

    /// A string option, or `""` when the key is missing.
    fn string_option<'v>(&self, vector: &'v TestVector, key: &str) -> GenResult<&'v str> {
        match vector.options.get(key) {
            None => Ok(""),
            Some(OptionValue::String(value)) => Ok(value),
            Some(other) => Err(GenError::malformed_option(
                &vector.description,
                key,
                "a string",
                other.kind(),
            )),
        }
    }
}
