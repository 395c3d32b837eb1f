//! Integration tests for network construction and program generation
//!
//! These tests validate the complete pipeline from rate definitions to the
//! emitted Python program.

use nucnet::{
    jacobian_string, rate_string, ydot_string, CodeGenerator, Network, NetworkError, Nucleus, Rate,
};

fn cf88() -> [f64; 7] {
    [61.2863, -84.165, 0.0, -1.56627, -0.0736084, -0.072797, -0.666667]
}

/// Carbon burning with the A=23 Urca pair and free-neutron decay
fn carbon_urca_network() -> Network {
    let rates = vec![
        Rate::builder()
            .reactant("c12", 12)
            .reactant("c12", 12)
            .product("he4", 4)
            .product("ne20", 20)
            .dens_exp(1)
            .reaclib("cf88", cf88())
            .build(),
        Rate::builder()
            .reactant("c12", 12)
            .reactant("c12", 12)
            .product("n", 1)
            .product("mg23", 23)
            .dens_exp(1)
            .reaclib("cf88", [-12.8056, -30.1498, 0.0, 11.4826, 1.82849, -0.34844, 0.0])
            .build(),
        Rate::builder()
            .reactant("c12", 12)
            .reactant("c12", 12)
            .product("p", 1)
            .product("na23", 23)
            .dens_exp(1)
            .reaclib("cf88", [60.9649, -84.165, 0.0, -1.4191, -0.114619, -0.070307, -0.666667])
            .build(),
        Rate::builder()
            .reactant("na23", 23)
            .product("ne23", 23)
            .constant("toki", 4.2e-2)
            .build(),
        Rate::builder()
            .reactant("ne23", 23)
            .product("na23", 23)
            .constant("toki", 1.7e-2)
            .build(),
        Rate::builder()
            .reactant("n", 1)
            .product("p", 1)
            .constant("wc12", 1.1378e-3)
            .build(),
    ];
    Network::new(rates).expect("Should build the network")
}

// ═══════════════════════════════════════════════════════════════════════════════
// Construction Tests
// ═══════════════════════════════════════════════════════════════════════════════

mod construction {
    use super::*;

    #[test]
    fn test_builder_derives_fname() {
        let rate = Rate::builder()
            .reactant("c12", 12)
            .reactant("c12", 12)
            .product("he4", 4)
            .product("ne20", 20)
            .build();

        assert_eq!(rate.fname(), "c12_c12__he4_ne20");
        assert_eq!(rate.to_string(), "c12 + c12 --> he4 + ne20");
    }

    #[test]
    fn test_duplicate_fname_aborts_before_emission() {
        let rates = vec![
            Rate::builder().reactant("a", 1).product("b", 1).fname("k").build(),
            Rate::builder().reactant("c", 1).product("d", 1).fname("k").build(),
        ];

        let result = Network::new(rates);
        assert!(matches!(
            result,
            Err(NetworkError::DuplicateIdentifier { fname }) if fname == "k"
        ));
    }

    #[test]
    fn test_from_json_pipeline() {
        let json = r#"[
            {
                "reactants": [
                    { "name": "c12", "a": 12 },
                    { "name": "c12", "a": 12 }
                ],
                "products": [
                    { "name": "he4", "a": 4 },
                    { "name": "ne20", "a": 20 }
                ],
                "dens_exp": 1,
                "fname": "c12_c12__he4_ne20",
                "sets": [
                    {
                        "type": "reaclib",
                        "label": "cf88",
                        "a": [61.2863, -84.165, 0.0, -1.56627, -0.0736084, -0.072797, -0.666667]
                    }
                ]
            },
            {
                "reactants": [{ "name": "na23", "a": 23 }],
                "products": [{ "name": "ne23", "a": 23 }],
                "fname": "na23__ne23",
                "sets": [{ "type": "constant", "label": "toki", "value": 4.2e-2 }]
            }
        ]"#;

        let network = Network::from_json(json).expect("Should parse and build");
        assert_eq!(network.rates().len(), 2);
        assert_eq!(network.nnuc(), 5);
        assert_eq!(network.rates()[0].prefactor(), 1.0);
    }

    #[test]
    fn test_rate_serialization_round_trip() {
        let rate = Rate::builder()
            .reactant("n", 1)
            .product("p", 1)
            .constant("wc12", 1.1378e-3)
            .build();

        let json = serde_json::to_string(&rate).expect("Should serialize");
        let back: Rate = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(back, rate);
    }

    #[test]
    fn test_reject_malformed_json() {
        let result = Network::from_json(r#"[{ "fname": "x" }]"#);
        assert!(matches!(result, Err(NetworkError::Parse(_))));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Graph Tests
// ═══════════════════════════════════════════════════════════════════════════════

mod graph {
    use super::*;

    #[test]
    fn test_unique_nuclei_order() {
        let network = carbon_urca_network();
        let names: Vec<&str> = network.nuclei().iter().map(Nucleus::name).collect();
        assert_eq!(
            names,
            vec!["c12", "he4", "ne20", "n", "mg23", "p", "na23", "ne23"]
        );
    }

    #[test]
    fn test_indexes_cover_every_rate() {
        let network = carbon_urca_network();

        for rate in network.rates() {
            for nucleus in rate.reactants() {
                assert!(
                    network
                        .consumers(nucleus)
                        .iter()
                        .any(|r| r.fname() == rate.fname()),
                    "consumers({}) is missing {}",
                    nucleus,
                    rate.fname()
                );
            }
            for nucleus in rate.products() {
                assert!(
                    network
                        .producers(nucleus)
                        .iter()
                        .any(|r| r.fname() == rate.fname()),
                    "producers({}) is missing {}",
                    nucleus,
                    rate.fname()
                );
            }
        }
    }

    #[test]
    fn test_urca_pair_is_cyclic() {
        let network = carbon_urca_network();
        let na23 = Nucleus::new("na23", 23);

        let consumed: Vec<&str> = network.consumers(&na23).iter().map(|r| r.fname()).collect();
        let produced: Vec<&str> = network.producers(&na23).iter().map(|r| r.fname()).collect();
        assert_eq!(consumed, vec!["na23__ne23"]);
        assert_eq!(produced, vec!["c12_c12__p_na23", "ne23__na23"]);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Synthesis Tests
// ═══════════════════════════════════════════════════════════════════════════════

mod synthesis {
    use super::*;

    #[test]
    fn test_reaclib_accumulator_block() {
        let rate = Rate::builder()
            .reactant("c12", 12)
            .reactant("c12", 12)
            .product("he4", 4)
            .product("ne20", 20)
            .dens_exp(1)
            .reaclib("cf88", cf88())
            .build();

        let block = rate_string(&rate);
        assert!(block.starts_with("# c12 + c12 --> he4 + ne20\nrate = 0.0\n\n# cf88\n"));
        assert!(block.contains(
            "rate += np.exp(6.12863000000000e1 - 8.41650000000000e1*tf.T9i \
             + 0.00000000000000e0*tf.T913i - 1.56627000000000e0*tf.T913 \
             - 7.36084000000000e-2*tf.T9 - 7.27970000000000e-2*tf.T953 \
             - 6.66667000000000e-1*tf.lnT9)"
        ));
    }

    #[test]
    fn test_multiple_sets_accumulate_in_order() {
        let rate = Rate::builder()
            .reactant("he4", 4)
            .reactant("c12", 12)
            .product("o16", 16)
            .dens_exp(1)
            .reaclib("nonresonant", [69.6526, -1.39254, 58.6128, -148.273, 9.08324, -0.541041, 70.3554])
            .reaclib("resonant", [13.9064, -10.6822, 0.0, 0.0, 0.0, 0.0, 0.0])
            .build();

        let block = rate_string(&rate);
        let first = block.find("# nonresonant").expect("first set label");
        let second = block.find("# resonant").expect("second set label");
        assert!(first < second);
        assert_eq!(block.matches("rate += np.exp(").count(), 2);
    }

    #[test]
    fn test_flux_and_derivative_share_traversal_order() {
        let rate = Rate::builder()
            .reactant("p", 1)
            .reactant("c12", 12)
            .product("n13", 13)
            .dens_exp(1)
            .build();
        let n13 = Nucleus::new("n13", 13);
        let c12 = Nucleus::new("c12", 12);

        // differentiating w.r.t. c12 keeps Y[p] in first position
        assert_eq!(ydot_string(&rate), "rho*Y[p]*Y[c12]*lambda_p_c12__n13");
        assert_eq!(
            jacobian_string(&rate, &n13, &c12),
            "rho*Y[p]*lambda_p_c12__n13"
        );
    }

    #[test]
    fn test_derivative_examples() {
        let fusion = Rate::builder()
            .reactant("A", 1)
            .reactant("A", 1)
            .product("B", 2)
            .dens_exp(1)
            .fname("x")
            .build();
        let decay = Rate::builder()
            .reactant("A", 1)
            .product("B", 1)
            .fname("y")
            .build();
        let a = Nucleus::new("A", 1);
        let b = Nucleus::new("B", 2);

        assert_eq!(ydot_string(&fusion), "rho*Y[A]**2*lambda_x");
        assert_eq!(jacobian_string(&fusion, &a, &a), "rho*2*Y[A]*lambda_x");
        assert_eq!(jacobian_string(&fusion, &a, &b), "");
        assert_eq!(ydot_string(&decay), "Y[A]*lambda_y");
        assert_eq!(jacobian_string(&decay, &b, &a), "lambda_y");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Codegen Tests
// ═══════════════════════════════════════════════════════════════════════════════

mod codegen {
    use super::*;

    #[test]
    fn test_rate_function_per_reaction() {
        let network = carbon_urca_network();
        let program = CodeGenerator::new(&network).generate();

        for rate in network.rates() {
            assert!(program.contains(&format!("def {}(tf):\n", rate.fname())));
            assert!(program.contains(&format!("    lambda_{f} = {f}(tf)\n", f = rate.fname())));
        }
    }

    #[test]
    fn test_rhs_aggregates_urca_pair() {
        let network = carbon_urca_network();
        let program = CodeGenerator::new(&network).generate();

        let na23_block = "    dYdt[na23] = (\n       -Y[na23]*lambda_na23__ne23\n       +rho*Y[c12]**2*lambda_c12_c12__p_na23\n       +Y[ne23]*lambda_ne23__na23\n       )\n";
        assert!(program.contains(na23_block));

        let c12_block = "    dYdt[c12] = (\n       -2*rho*Y[c12]**2*lambda_c12_c12__he4_ne20\n       -2*rho*Y[c12]**2*lambda_c12_c12__n_mg23\n       -2*rho*Y[c12]**2*lambda_c12_c12__p_na23\n       )\n";
        assert!(program.contains(c12_block));
    }

    #[test]
    fn test_mass_array_entries() {
        let network = carbon_urca_network();
        let program = CodeGenerator::new(&network).generate();

        assert!(program.contains("mass = np.zeros((nnuc), dtype=np.int32)\n"));
        assert!(program.contains("mass[c12] = 12\n"));
        assert!(program.contains("mass[mg23] = 23\n"));
        assert!(program.contains("mass[n] = 1\n"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = CodeGenerator::new(&carbon_urca_network()).generate();
        let b = CodeGenerator::new(&carbon_urca_network()).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_jacobian_couples_urca_pair() {
        let network = carbon_urca_network();
        let program = CodeGenerator::with_jacobian(&network).generate();

        assert!(program.contains("    J[na23, na23] = (\n       -lambda_na23__ne23\n       )\n"));
        assert!(program.contains("    J[na23, ne23] = (\n       +lambda_ne23__na23\n       )\n"));
        assert!(program
            .contains("    J[na23, c12] = (\n       +rho*2*Y[c12]*lambda_c12_c12__p_na23\n       )\n"));
        // the Urca pair never couples to helium
        assert!(!program.contains("J[na23, he4]"));
        assert!(program.ends_with("    return J\n"));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// End-to-End Tests
// ═══════════════════════════════════════════════════════════════════════════════

mod end_to_end {
    use super::*;

    #[test]
    fn test_generated_program_golden() {
        let rates = vec![Rate::builder()
            .reactant("A", 1)
            .reactant("A", 1)
            .product("B", 2)
            .dens_exp(1)
            .fname("x")
            .build()];
        let network = Network::new(rates).unwrap();
        let program = CodeGenerator::new(&network).generate();

        let expected = r#"import numpy as np
from nucnet.rates import Tfactors

A = 0
B = 1
nnuc = 2

mass = np.zeros((nnuc), dtype=np.int32)

mass[A] = 1
mass[B] = 2

def x(tf):
    # A + A --> B
    rate = 0.0

    return rate

def rhs(t, Y, rho, T):

    tf = Tfactors(T)

    lambda_x = x(tf)

    dYdt = np.zeros((nnuc), dtype=np.float64)

    dYdt[A] = (
       -2*rho*Y[A]**2*lambda_x
       )

    dYdt[B] = (
       +rho*Y[A]**2*lambda_x
       )

    return dYdt
"#;
        assert_eq!(program, expected);
    }

    #[test]
    fn test_written_file_matches_generated_text() {
        let network = carbon_urca_network();
        let generator = CodeGenerator::new(&network);

        let path = std::env::temp_dir().join(format!("nucnet_urca_{}.py", std::process::id()));
        generator.write_to_path(&path).expect("Should write the program");

        let written = std::fs::read_to_string(&path).expect("Should read back");
        assert_eq!(written, generator.generate());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_failure_surfaces_io_error() {
        let network = carbon_urca_network();
        let generator = CodeGenerator::new(&network);

        let path = std::env::temp_dir()
            .join(format!("nucnet_missing_{}", std::process::id()))
            .join("out.py");
        let result = generator.write_to_path(&path);
        assert!(matches!(result, Err(NetworkError::Io(_))));
    }
}
