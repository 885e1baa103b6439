//! Geant4 process type / subtype catalogue (`G4ProcessType`, `G4EmProcessSubType`,
//! `G4HadronicProcessType`, `G4DecayProcessType` and friends).

pub(super) const BUILTIN_PROCESS_TABLE: &[(i32, i32, &str)] = &[
    (1, 91, "Transportation"),
    (1, 92, "CoupledTransportation"),
    (2, 1, "CoulombScattering"),
    (2, 2, "Ionisation"),
    (2, 3, "Bremsstrahlung"),
    (2, 4, "PairProdByCharged"),
    (2, 5, "Annihilation"),
    (2, 6, "AnnihilationToMuMu"),
    (2, 7, "AnnihilationToHadrons"),
    (2, 8, "NuclearStopping"),
    (2, 9, "ElectronGeneralProcess"),
    (2, 10, "MultipleScattering"),
    (2, 11, "Rayleigh"),
    (2, 12, "PhotoElectricEffect"),
    (2, 13, "ComptonScattering"),
    (2, 14, "GammaConversion"),
    (2, 15, "GammaConversionToMuMu"),
    (2, 16, "GammaGeneralProcess"),
    (2, 17, "PositronGeneralProcess"),
    (2, 18, "AnnihilationToTauTau"),
    (2, 21, "Cerenkov"),
    (2, 22, "Scintillation"),
    (2, 23, "SynchrotronRadiation"),
    (2, 24, "TransitionRadiation"),
    (2, 25, "SurfaceReflection"),
    (2, 40, "DarkBremsstrahlung"),
    (2, 49, "MuPairByMuon"),
    (3, 31, "OpAbsorption"),
    (3, 32, "OpBoundary"),
    (3, 33, "OpRayleigh"),
    (3, 34, "OpWLS"),
    (3, 35, "OpMieHG"),
    (4, 111, "HadronElastic"),
    (4, 121, "HadronInelastic"),
    (4, 131, "Capture"),
    (4, 132, "MuAtomicCapture"),
    (4, 141, "Fission"),
    (4, 151, "HadronAtRest"),
    (4, 152, "LeptonAtRest"),
    (4, 161, "ChargeExchange"),
    (4, 210, "RadioactiveDecay"),
    (5, 121, "PhotonuclearInelastic"),
    (6, 201, "Decay"),
    (6, 202, "DecayWithSpin"),
    (6, 203, "DecayPiSpin"),
    (6, 210, "DecayRadioactive"),
    (6, 211, "DecayUnknown"),
    (6, 221, "DecayMuAtom"),
    (6, 231, "DecayExternal"),
    (7, 401, "StepLimiter"),
    (7, 402, "UserSpecialCuts"),
    (7, 403, "NeutronKiller"),
    (10, 491, "ParallelWorld"),
];
